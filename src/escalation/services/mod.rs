//! Application services for support ticket escalation.

mod form;
mod workflow;

pub use form::{EscalationFormController, FormSnapshot};
pub use workflow::{EscalationError, EscalationOutcome, EscalationResult, EscalationWorkflow};
