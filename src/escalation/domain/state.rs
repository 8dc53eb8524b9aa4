//! Per-invocation escalation state machine.

use super::InvalidEscalationTransition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a single escalation invocation.
///
/// States advance strictly in declaration order. `Failed` is reachable from
/// every non-terminal state; `Succeeded` and `Failed` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationState {
    /// No invocation has started.
    Idle,
    /// Checking that a work item id and project are known.
    Validating,
    /// Reading the source ticket.
    Fetching,
    /// Creating the linked issue.
    Creating,
    /// Copying ticket comments to the issue.
    CopyingComments,
    /// Moving the ticket to the second-line area path.
    Reclassifying,
    /// The escalation completed.
    Succeeded,
    /// The escalation stopped at the recorded step.
    Failed,
}

impl EscalationState {
    /// Returns the canonical representation used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Fetching => "fetching",
            Self::Creating => "creating",
            Self::CopyingComments => "copying_comments",
            Self::Reclassifying => "reclassifying",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` for absorbing states.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns the state that follows on success, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Validating),
            Self::Validating => Some(Self::Fetching),
            Self::Fetching => Some(Self::Creating),
            Self::Creating => Some(Self::CopyingComments),
            Self::CopyingComments => Some(Self::Reclassifying),
            Self::Reclassifying => Some(Self::Succeeded),
            Self::Succeeded | Self::Failed => None,
        }
    }

    /// Returns `true` when moving from `self` to `target` is permitted.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        match target {
            Self::Failed => !self.is_terminal() && self != Self::Idle,
            _ => self.next() == Some(target),
        }
    }
}

impl fmt::Display for EscalationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the current state of one invocation and the step it failed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationProgress {
    state: EscalationState,
    failed_in: Option<EscalationState>,
}

impl EscalationProgress {
    /// Creates progress in the `Idle` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: EscalationState::Idle,
            failed_in: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> EscalationState {
        self.state
    }

    /// Returns the step that was active when the invocation failed.
    #[must_use]
    pub const fn failed_in(&self) -> Option<EscalationState> {
        self.failed_in
    }

    /// Moves to the next state in the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEscalationTransition`] when `target` does not follow
    /// the current state.
    pub fn advance_to(
        &mut self,
        target: EscalationState,
    ) -> Result<EscalationState, InvalidEscalationTransition> {
        if target == EscalationState::Failed || !self.state.can_transition_to(target) {
            return Err(InvalidEscalationTransition {
                from: self.state.as_str(),
                to: target.as_str(),
            });
        }
        let previous = self.state;
        self.state = target;
        Ok(previous)
    }

    /// Moves to `Failed`, remembering the active step.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEscalationTransition`] when the invocation has not
    /// started or already finished.
    pub fn fail(&mut self) -> Result<EscalationState, InvalidEscalationTransition> {
        if !self.state.can_transition_to(EscalationState::Failed) {
            return Err(InvalidEscalationTransition {
                from: self.state.as_str(),
                to: EscalationState::Failed.as_str(),
            });
        }
        let previous = self.state;
        self.failed_in = Some(previous);
        self.state = EscalationState::Failed;
        Ok(previous)
    }
}

impl Default for EscalationProgress {
    fn default() -> Self {
        Self::new()
    }
}
