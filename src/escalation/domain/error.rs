//! Error types for escalation domain validation.

use thiserror::Error;

/// Errors returned while constructing escalation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EscalationDomainError {
    /// The work item identifier is not a saved work item.
    #[error("invalid work item id {0}, expected a positive integer")]
    InvalidWorkItemId(u32),

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The collection URL is not an absolute HTTP(S) URL.
    #[error("invalid collection url '{0}', expected an http or https url")]
    InvalidCollectionUrl(String),

    /// The organization name is empty or contains path separators.
    #[error("invalid organization name '{0}'")]
    InvalidOrganization(String),

    /// The customer portal tenant cannot be used as a host name.
    #[error("invalid customer portal tenant '{0}'")]
    InvalidPortalTenant(String),
}

/// Error returned when an escalation state transition is not permitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot move escalation from {from} to {to}")]
pub struct InvalidEscalationTransition {
    /// State the escalation was in.
    pub from: &'static str,
    /// Requested target state.
    pub to: &'static str,
}
