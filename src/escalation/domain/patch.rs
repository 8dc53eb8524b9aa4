//! JSON-patch style mutation instructions sent to the work item store.

use super::{WorkItemRelation, fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Adds a field value or appends a relation.
    Add,
}

/// A single field or relation mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub op: PatchOp,
    /// JSON-pointer-like target, such as `/fields/System.Title`.
    pub path: String,
    /// Value written at the target path.
    pub value: Value,
}

impl PatchOperation {
    const RELATIONS_APPEND_PATH: &'static str = "/relations/-";

    /// Sets a field to a string value.
    #[must_use]
    pub fn add_field(field: &str, value: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Add,
            path: format!("/fields/{field}"),
            value: Value::String(value.into()),
        }
    }

    /// Appends a relation to the work item.
    #[must_use]
    pub fn add_relation(relation: &WorkItemRelation) -> Self {
        let mut value = serde_json::Map::new();
        value.insert("rel".to_owned(), Value::String(relation.rel.clone()));
        value.insert("url".to_owned(), Value::String(relation.url.clone()));
        Self {
            op: PatchOp::Add,
            path: Self::RELATIONS_APPEND_PATH.to_owned(),
            value: Value::Object(value),
        }
    }

    /// Returns the field reference name when the path targets a field.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.path.strip_prefix("/fields/")
    }

    /// Returns the relation carried by the operation when the path appends
    /// a relation.
    #[must_use]
    pub fn relation(&self) -> Option<WorkItemRelation> {
        if self.path != Self::RELATIONS_APPEND_PATH {
            return None;
        }
        serde_json::from_value(self.value.clone()).ok()
    }
}

/// Ordered list of patch operations submitted as one update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an operation.
    #[must_use]
    pub fn with(mut self, operation: PatchOperation) -> Self {
        self.0.push(operation);
        self
    }

    /// Document appending `text` to the discussion history.
    #[must_use]
    pub fn history_entry(text: impl Into<String>) -> Self {
        Self::new().with(PatchOperation::add_field(fields::HISTORY, text))
    }

    /// Document moving a work item to `area_path`.
    #[must_use]
    pub fn reclassify(area_path: impl Into<String>) -> Self {
        Self::new().with(PatchOperation::add_field(fields::AREA_PATH, area_path))
    }

    /// Returns the operations in submission order.
    #[must_use]
    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Returns the string value written to `field`, if any.
    ///
    /// When the field is written more than once the last value wins, which
    /// mirrors how the store applies the document.
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|operation| operation.field_name() == Some(field))
            .and_then(|operation| operation.value.as_str())
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the document holds no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatchDocument {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
