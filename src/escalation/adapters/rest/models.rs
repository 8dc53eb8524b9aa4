//! Wire models of the work item tracking REST API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::escalation::{
    domain::{Comment, WorkItem, WorkItemId, WorkItemRelation},
    ports::WorkItemStoreError,
};

#[derive(Debug, Deserialize)]
pub(super) struct WorkItemResponse {
    pub(super) id: u32,
    #[serde(default)]
    pub(super) fields: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub(super) relations: Option<Vec<RelationResponse>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RelationResponse {
    pub(super) rel: String,
    pub(super) url: String,
}

impl WorkItemResponse {
    pub(super) fn into_domain(self) -> Result<WorkItem, WorkItemStoreError> {
        let id = WorkItemId::new(self.id).map_err(WorkItemStoreError::transport)?;
        let mut work_item = WorkItem::new(id);
        for (name, value) in self.fields.unwrap_or_default() {
            work_item.set_field(name, value);
        }
        for relation in self.relations.unwrap_or_default() {
            work_item.push_relation(WorkItemRelation::new(relation.rel, relation.url));
        }
        Ok(work_item)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentListResponse {
    #[serde(default)]
    pub(super) comments: Vec<CommentResponse>,
    #[serde(default)]
    pub(super) continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentResponse {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) text: Option<String>,
    pub(super) created_date: DateTime<Utc>,
    #[serde(default)]
    pub(super) is_deleted: bool,
}

impl CommentResponse {
    pub(super) fn into_domain(self) -> Comment {
        Comment::new(self.id, self.text.unwrap_or_default(), self.created_date)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub(super) message: String,
}
