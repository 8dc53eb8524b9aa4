//! Fixed-value work item form for tests and command-line runs.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::escalation::{
    domain::WorkItem,
    ports::{WorkItemForm, WorkItemFormError, WorkItemFormResult},
};

/// Work item form reporting a fixed identifier and field values.
#[derive(Debug, Clone, Default)]
pub struct StaticWorkItemForm {
    work_item_id: Option<u32>,
    fields: BTreeMap<String, Value>,
}

impl StaticWorkItemForm {
    /// Creates a form for an open work item.
    #[must_use]
    pub const fn new(work_item_id: u32) -> Self {
        Self {
            work_item_id: Some(work_item_id),
            fields: BTreeMap::new(),
        }
    }

    /// Creates a form whose host service is unavailable.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            work_item_id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Creates a form showing a stored work item.
    #[must_use]
    pub fn showing(work_item: &WorkItem) -> Self {
        Self {
            work_item_id: Some(work_item.id().value()),
            fields: work_item.fields().clone(),
        }
    }

    /// Sets a field value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl WorkItemForm for StaticWorkItemForm {
    async fn work_item_id(&self) -> WorkItemFormResult<u32> {
        self.work_item_id.ok_or(WorkItemFormError::Unavailable)
    }

    async fn field_values(&self, fields: &[&str]) -> WorkItemFormResult<BTreeMap<String, Value>> {
        if self.work_item_id.is_none() {
            return Err(WorkItemFormError::Unavailable);
        }
        Ok(fields
            .iter()
            .filter_map(|name| {
                self.fields
                    .get(*name)
                    .map(|value| ((*name).to_owned(), value.clone()))
            })
            .collect())
    }
}
