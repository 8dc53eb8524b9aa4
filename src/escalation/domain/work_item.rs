//! Work item, relation, and comment read models.

use super::{WorkItemId, fields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Typed link from one work item to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItemRelation {
    /// Link kind reference name, such as `System.LinkTypes.Hierarchy-Reverse`.
    pub rel: String,
    /// Target resource URL.
    pub url: String,
}

impl WorkItemRelation {
    /// Creates a relation of the given kind.
    #[must_use]
    pub fn new(rel: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            url: url.into(),
        }
    }

    /// Creates a child-to-parent relation pointing at `parent_url`.
    #[must_use]
    pub fn hierarchy_reverse(parent_url: impl Into<String>) -> Self {
        Self::new(fields::HIERARCHY_REVERSE, parent_url)
    }
}

/// Transient read copy of a work item owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    id: WorkItemId,
    fields: BTreeMap<String, Value>,
    relations: Vec<WorkItemRelation>,
}

impl WorkItem {
    /// Creates a work item with no fields or relations.
    #[must_use]
    pub const fn new(id: WorkItemId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
            relations: Vec::new(),
        }
    }

    /// Sets a field value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Appends a relation.
    #[must_use]
    pub fn with_relation(mut self, relation: WorkItemRelation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Sets or replaces a field value in place.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Appends a relation in place.
    pub fn push_relation(&mut self, relation: WorkItemRelation) {
        self.relations.push(relation);
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> WorkItemId {
        self.id
    }

    /// Returns all field values keyed by reference name.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a field value when it holds a string.
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Returns the relations in store order.
    #[must_use]
    pub fn relations(&self) -> &[WorkItemRelation] {
        &self.relations
    }

    /// Returns the title, or an empty string when unset.
    #[must_use]
    pub fn title(&self) -> &str {
        self.field_str(fields::TITLE).unwrap_or_default()
    }

    /// Returns the description HTML, or an empty string when unset.
    #[must_use]
    pub fn description(&self) -> &str {
        self.field_str(fields::DESCRIPTION).unwrap_or_default()
    }

    /// Returns the customer-details blob, or an empty string when unset.
    #[must_use]
    pub fn customer_details(&self) -> &str {
        self.field_str(fields::CUSTOMER_DETAILS).unwrap_or_default()
    }

    /// Returns the area path, if set.
    #[must_use]
    pub fn area_path(&self) -> Option<&str> {
        self.field_str(fields::AREA_PATH)
    }
}

/// Discussion comment attached to a single work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned comment identifier.
    pub id: u64,
    /// Comment body (plain text or HTML).
    pub text: String,
    /// Creation timestamp used for chronological ordering.
    pub created_date: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>, created_date: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            created_date,
        }
    }
}
