//! Trigger adapter that records what the user would see.

use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::escalation::{
    domain::{Notification, TriggerState},
    ports::EscalationTrigger,
};

/// Thread-safe trigger recording every state and notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingTrigger {
    state: Arc<RwLock<RecordedTrigger>>,
}

#[derive(Debug, Default)]
struct RecordedTrigger {
    states: Vec<TriggerState>,
    notifications: Vec<Notification>,
}

impl RecordingTrigger {
    /// Creates a trigger with no recorded interactions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every state shown, oldest first.
    #[must_use]
    pub fn states(&self) -> Vec<TriggerState> {
        self.state
            .read()
            .map(|recorded| recorded.states.clone())
            .unwrap_or_default()
    }

    /// Returns the state currently shown, if any was shown.
    #[must_use]
    pub fn current(&self) -> Option<TriggerState> {
        self.states().last().copied()
    }

    /// Returns every notification delivered, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.state
            .read()
            .map(|recorded| recorded.notifications.clone())
            .unwrap_or_default()
    }
}

impl EscalationTrigger for RecordingTrigger {
    fn show(&self, state: TriggerState) {
        match self.state.write() {
            Ok(mut recorded) => recorded.states.push(state),
            Err(err) => warn!(error = %err, "trigger recorder lock poisoned"),
        }
    }

    fn notify(&self, notification: Notification) {
        info!(message = %notification, "user notification");
        match self.state.write() {
            Ok(mut recorded) => recorded.notifications.push(notification),
            Err(err) => warn!(error = %err, "trigger recorder lock poisoned"),
        }
    }
}
