//! User-facing escalation trigger port.

use crate::escalation::domain::{Notification, TriggerState};

/// Button and notification surface owned by the host UI.
pub trait EscalationTrigger: Send + Sync {
    /// Presents the trigger in the given state.
    fn show(&self, state: TriggerState);

    /// Delivers a message to the user.
    fn notify(&self, notification: Notification);
}
