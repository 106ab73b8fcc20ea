use serde::{Deserialize, Serialize};

/// Events that move a child task through its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TaskEvent {
    /// Creation request sent
    Submit,
    /// Service returned the created work item id
    Create(i64),
    /// Validation or submission failed with an error message
    Fail(String),
}

impl TaskEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Create(_) => "create",
            Self::Fail(_) => "fail",
        }
    }
}
