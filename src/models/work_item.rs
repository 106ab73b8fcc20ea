//! # Work Item
//!
//! The subset of the tracking service's work item representation that this
//! crate consumes: identity, the `_links` collection and the field map.
//! Lookups go through typed accessors that report [`MissingFieldError`]
//! instead of failing on a cast.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::MissingFieldError;

/// A hyperlink entry of the `_links` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    pub href: String,
}

/// Work item as returned by fetch and create calls
///
/// # Examples
///
/// ```rust
/// use workitem_batch::models::WorkItem;
///
/// let item: WorkItem = serde_json::from_value(serde_json::json!({
///     "id": 12,
///     "fields": { "System.TeamProject": "Proj" },
///     "_links": { "self": { "href": "https://dev.azure.com/org/_apis/wit/workItems/12" } }
/// }))
/// .unwrap();
///
/// assert_eq!(item.id, Some(12));
/// assert_eq!(item.field_str("System.TeamProject").unwrap(), "Proj");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<i64>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(rename = "_links", default)]
    pub links: HashMap<String, ReferenceLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl WorkItem {
    /// Create a work item with only an id set
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Builder-style field setter
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder-style link setter
    #[must_use]
    pub fn with_link(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        self.links
            .insert(name.into(), ReferenceLink { href: href.into() });
        self
    }

    /// String field value
    pub fn field_str(&self, name: &str) -> Result<&str, MissingFieldError> {
        match self.fields.get(name) {
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(MissingFieldError::NotAString {
                item: self.label(),
                name: name.to_string(),
            }),
            None => Err(MissingFieldError::Field {
                item: self.label(),
                name: name.to_string(),
            }),
        }
    }

    /// `href` of a named entry in the `_links` collection
    pub fn link_href(&self, name: &str) -> Result<&str, MissingFieldError> {
        self.links
            .get(name)
            .map(|link| link.href.as_str())
            .ok_or_else(|| MissingFieldError::Link {
                item: self.label(),
                name: name.to_string(),
            })
    }

    fn label(&self) -> String {
        self.id
            .map_or_else(|| "<unidentified>".to_string(), |id| format!("#{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_service_payload() {
        let payload = json!({
            "id": 4711,
            "rev": 7,
            "fields": {
                "System.IterationPath": "Proj\\Sprint1",
                "System.AreaPath": "Proj\\TeamA",
                "System.TeamProject": "Proj",
                "Microsoft.VSTS.Scheduling.RemainingWork": 2.0
            },
            "_links": {
                "self": { "href": "https://dev.azure.com/org/_apis/wit/workItems/4711" },
                "html": { "href": "https://dev.azure.com/org/Proj/_workitems/edit/4711" }
            },
            "url": "https://dev.azure.com/org/_apis/wit/workItems/4711"
        });

        let item: WorkItem = serde_json::from_value(payload).unwrap();
        assert_eq!(item.id, Some(4711));
        assert_eq!(item.field_str("System.AreaPath").unwrap(), "Proj\\TeamA");
        assert_eq!(
            item.link_href("html").unwrap(),
            "https://dev.azure.com/org/Proj/_workitems/edit/4711"
        );
    }

    #[test]
    fn missing_id_deserializes_as_none() {
        let item: WorkItem = serde_json::from_value(json!({ "fields": {} })).unwrap();
        assert_eq!(item.id, None);
        assert!(item.links.is_empty());
    }

    #[test]
    fn accessors_report_missing_entries() {
        let item = WorkItem::new(3).with_field("System.Rev", 2);

        assert_eq!(
            item.field_str("System.AreaPath"),
            Err(MissingFieldError::Field {
                item: "#3".to_string(),
                name: "System.AreaPath".to_string(),
            })
        );
        assert!(matches!(
            item.field_str("System.Rev"),
            Err(MissingFieldError::NotAString { .. })
        ));
        assert_eq!(
            item.link_href("self"),
            Err(MissingFieldError::Link {
                item: "#3".to_string(),
                name: "self".to_string(),
            })
        );
    }
}
