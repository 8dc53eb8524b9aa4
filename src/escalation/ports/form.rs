//! Host work item form ports.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for host form lookups.
pub type WorkItemFormResult<T> = Result<T, WorkItemFormError>;

/// Read access to the work item form the extension is hosted in.
#[async_trait]
pub trait WorkItemForm: Send + Sync {
    /// Returns the identifier of the open work item.
    ///
    /// Unsaved work items report zero.
    async fn work_item_id(&self) -> WorkItemFormResult<u32>;

    /// Returns the current values of the named fields.
    ///
    /// Fields without a value are omitted from the map.
    async fn field_values(&self, fields: &[&str]) -> WorkItemFormResult<BTreeMap<String, Value>>;
}

/// Errors returned by host form adapters.
#[derive(Debug, Clone, Error)]
pub enum WorkItemFormError {
    /// The host has no work item form available.
    #[error("work item form service is unavailable")]
    Unavailable,

    /// Generic host failure.
    #[error("work item form error: {0}")]
    Host(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkItemFormError {
    /// Wraps a host error.
    pub fn host(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Host(Arc::new(err))
    }
}

/// Lifecycle notifications the host delivers to a work item form
/// contribution.
#[async_trait]
pub trait FormLifecycle: Send + Sync {
    /// Called when the work item is fully loaded in the form.
    async fn on_loaded(&self);

    /// Called when a field value changes on the form.
    fn on_field_changed(&self, field: &str);
}
