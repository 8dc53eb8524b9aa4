//! Escalation trigger presentation states and user notifications.

use super::{WorkItemId, fields};
use std::fmt;

/// Visible state of the escalation button on the work item form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerState {
    /// Not shown; the ticket is not eligible or was already escalated.
    Hidden,
    /// Shown and clickable.
    Enabled,
    /// Shown but disabled while an escalation is in flight.
    Busy,
}

impl TriggerState {
    /// Decides the initial state from the loaded ticket's area path.
    ///
    /// Only an exact match with the support area path shows the trigger.
    #[must_use]
    pub fn for_area_path(area_path: Option<&str>) -> Self {
        if area_path == Some(fields::SUPPORT_AREA_PATH) {
            Self::Enabled
        } else {
            Self::Hidden
        }
    }

    /// Returns the button label, or `None` when hidden.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Enabled => Some("Escalate to 2nd"),
            Self::Busy => Some("Escalating..."),
        }
    }

    /// Returns `true` when the button is shown.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Returns `true` when the button accepts clicks.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Message shown to the user at the end of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// The form did not provide a saved work item and project.
    MissingContext,
    /// The issue was created and linked.
    Escalated(WorkItemId),
    /// Any remote step failed; details are in the log.
    Failed,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext => f.write_str(
                "Work item data is missing. Make sure this extension is running in a valid work item form.",
            ),
            Self::Escalated(issue_id) => {
                write!(f, "Issue #{issue_id} successfully created and linked.")
            }
            Self::Failed => f.write_str("Failed to create work item. Check console for details."),
        }
    }
}
