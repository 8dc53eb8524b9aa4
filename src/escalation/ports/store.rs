//! Work item store port used by the escalation workflow.

use crate::escalation::domain::{Comment, PatchDocument, ProjectName, WorkItem, WorkItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work item store operations.
pub type WorkItemStoreResult<T> = Result<T, WorkItemStoreError>;

/// Remote work-tracking store contract.
///
/// The store decides how atomically a patch document is applied.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    /// Reads a work item with its fields and relations.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemStoreError::NotFound`] when no work item has the
    /// identifier.
    async fn get_work_item(&self, id: WorkItemId) -> WorkItemStoreResult<WorkItem>;

    /// Creates a work item of `type_name` in `project` from a patch document
    /// and returns it with its assigned identifier.
    async fn create_work_item(
        &self,
        project: &ProjectName,
        type_name: &str,
        document: &PatchDocument,
    ) -> WorkItemStoreResult<WorkItem>;

    /// Applies a patch document to an existing work item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemStoreError::NotFound`] when the work item does not
    /// exist.
    async fn update_work_item(
        &self,
        id: WorkItemId,
        document: &PatchDocument,
    ) -> WorkItemStoreResult<WorkItem>;

    /// Lists the comments of a work item owned by `project`.
    ///
    /// Implementations should return comments oldest first; callers must
    /// not rely on it.
    async fn get_comments(
        &self,
        project: &ProjectName,
        id: WorkItemId,
    ) -> WorkItemStoreResult<Vec<Comment>>;
}

/// Errors returned by work item store implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkItemStoreError {
    /// The work item does not exist or is not visible.
    #[error("work item not found: {0}")]
    NotFound(WorkItemId),

    /// The store refused the request, for example on field validation.
    #[error("work item store rejected the request with status {status}: {message}")]
    Rejected {
        /// Status code reported by the store.
        status: u16,
        /// Diagnostic message reported by the store.
        message: String,
    },

    /// The request did not complete.
    #[error("work item store transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkItemStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
