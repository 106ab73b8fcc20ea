//! # Field-Update Document
//!
//! JSON Patch operations against a work item's field map and relation list.
//! The service applies a document atomically as one request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Patch operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
}

/// One entry of a field-update document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: Value,
}

/// Value of a `/relations/-` operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRelation {
    pub rel: String,
    pub url: String,
}

/// Ordered list of patch operations, serialized as a JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument {
    operations: Vec<PatchOperation>,
}

impl PatchDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of a field reference name, e.g. `/fields/System.Title`
    pub fn field_path(name: &str) -> String {
        format!("/fields/{name}")
    }

    /// Append an `add` of a field value
    #[must_use]
    pub fn add_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.operations.push(PatchOperation {
            op: PatchOp::Add,
            path: Self::field_path(name),
            value: value.into(),
        });
        self
    }

    /// Append an `add` of a link to the relation list
    #[must_use]
    pub fn add_relation(mut self, rel: &str, url: &str) -> Self {
        let relation = WorkItemRelation {
            rel: rel.to_string(),
            url: url.to_string(),
        };
        self.operations.push(PatchOperation {
            op: PatchOp::Add,
            path: "/relations/-".to_string(),
            value: serde_json::json!(relation),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Value added for a field reference name
    pub fn field_value(&self, name: &str) -> Option<&Value> {
        let path = Self::field_path(name);
        self.operations
            .iter()
            .find(|operation| operation.path == path)
            .map(|operation| &operation.value)
    }

    /// Relations added by this document
    pub fn relations(&self) -> Vec<WorkItemRelation> {
        self.operations
            .iter()
            .filter(|operation| operation.path.starts_with("/relations/"))
            .filter_map(|operation| serde_json::from_value(operation.value.clone()).ok())
            .collect()
    }
}
