//! Identifier and validated scalar types for the escalation domain.

use super::EscalationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned work item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItemId(u32);

impl WorkItemId {
    /// Creates a validated work item identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationDomainError::InvalidWorkItemId`] when the value is
    /// zero, which the host uses for forms that have not been saved yet.
    pub const fn new(value: u32) -> Result<Self, EscalationDomainError> {
        if value == 0 {
            return Err(EscalationDomainError::InvalidWorkItemId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team project name as reported by the work item form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationDomainError::EmptyProjectName`] if the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, EscalationDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(EscalationDomainError::EmptyProjectName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the project name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base URL of the work-tracking collection, without a trailing slash.
///
/// For Azure DevOps Services this is `https://dev.azure.com/{organization}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionUrl(String);

impl CollectionUrl {
    const CLOUD_HOST: &'static str = "https://dev.azure.com";

    /// Creates a collection URL from an absolute base URL.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationDomainError::InvalidCollectionUrl`] when the value
    /// is not an `http://` or `https://` URL with a host.
    pub fn new(value: impl Into<String>) -> Result<Self, EscalationDomainError> {
        let raw = value.into();
        let normalized = raw.trim().trim_end_matches('/');
        let host = normalized
            .strip_prefix("https://")
            .or_else(|| normalized.strip_prefix("http://"));
        let is_valid = host.is_some_and(|rest| !rest.is_empty())
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(EscalationDomainError::InvalidCollectionUrl(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Builds the cloud collection URL for an organization.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationDomainError::InvalidOrganization`] when the name
    /// is empty or contains a path separator or whitespace.
    pub fn for_organization(organization: &str) -> Result<Self, EscalationDomainError> {
        let name = organization.trim();
        if name.is_empty() || name.contains('/') || name.chars().any(char::is_whitespace) {
            return Err(EscalationDomainError::InvalidOrganization(
                organization.to_owned(),
            ));
        }
        Ok(Self(format!("{}/{name}", Self::CLOUD_HOST)))
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation identifier for a single escalation invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscalationRunId(Uuid);

impl EscalationRunId {
    /// Creates a new random run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EscalationRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EscalationRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
