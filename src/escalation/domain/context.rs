//! Per-invocation escalation context and URL construction.

use super::{CollectionUrl, EscalationRunId, ProjectName, WorkItemId};
use std::fmt;
use thiserror::Error;

/// Raised when the host did not provide a saved work item and its project.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("work item context is missing: {missing}")]
pub struct MissingEscalationContext {
    missing: MissingPart,
}

impl MissingEscalationContext {
    /// Returns which part of the context was absent.
    #[must_use]
    pub const fn missing(&self) -> MissingPart {
        self.missing
    }
}

/// Context component absent from the host form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingPart {
    /// No saved work item identifier.
    WorkItemId,
    /// No team project name.
    ProjectName,
    /// Neither identifier nor project name.
    Both,
}

impl fmt::Display for MissingPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::WorkItemId => "work item id",
            Self::ProjectName => "project name",
            Self::Both => "work item id and project name",
        };
        f.write_str(text)
    }
}

/// Transient, workflow-local state of a single escalation.
///
/// Built once per invocation and discarded when the workflow finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationContext {
    run_id: EscalationRunId,
    work_item_id: WorkItemId,
    project: ProjectName,
    collection: CollectionUrl,
}

impl EscalationContext {
    /// Creates a context from validated parts.
    #[must_use]
    pub fn new(work_item_id: WorkItemId, project: ProjectName, collection: CollectionUrl) -> Self {
        Self {
            run_id: EscalationRunId::new(),
            work_item_id,
            project,
            collection,
        }
    }

    /// Creates a context from raw host form values.
    ///
    /// A zero identifier counts as absent, as does a blank project name.
    ///
    /// # Errors
    ///
    /// Returns [`MissingEscalationContext`] naming the absent parts.
    pub fn from_form(
        work_item_id: Option<u32>,
        project: Option<&str>,
        collection: CollectionUrl,
    ) -> Result<Self, MissingEscalationContext> {
        let valid_id = work_item_id.and_then(|value| WorkItemId::new(value).ok());
        let valid_project = project.and_then(|value| ProjectName::new(value).ok());
        match (valid_id, valid_project) {
            (Some(ticket_id), Some(name)) => Ok(Self::new(ticket_id, name, collection)),
            (None, Some(_)) => Err(MissingEscalationContext {
                missing: MissingPart::WorkItemId,
            }),
            (Some(_), None) => Err(MissingEscalationContext {
                missing: MissingPart::ProjectName,
            }),
            (None, None) => Err(MissingEscalationContext {
                missing: MissingPart::Both,
            }),
        }
    }

    /// Returns the correlation identifier for this invocation.
    #[must_use]
    pub const fn run_id(&self) -> EscalationRunId {
        self.run_id
    }

    /// Returns the source ticket identifier.
    #[must_use]
    pub const fn work_item_id(&self) -> WorkItemId {
        self.work_item_id
    }

    /// Returns the team project name.
    #[must_use]
    pub const fn project(&self) -> &ProjectName {
        &self.project
    }

    /// Returns the collection base URL.
    #[must_use]
    pub const fn collection(&self) -> &CollectionUrl {
        &self.collection
    }

    /// Human-facing URL of the source ticket's edit form.
    #[must_use]
    pub fn ticket_edit_url(&self) -> String {
        format!(
            "{}/{}/_workitems/edit/{}",
            self.collection, self.project, self.work_item_id
        )
    }

    /// Canonical API resource URL of the source ticket.
    #[must_use]
    pub fn ticket_api_url(&self) -> String {
        format!(
            "{}/{}/_apis/wit/workItems/{}",
            self.collection, self.project, self.work_item_id
        )
    }
}
