//! # Task Detail
//!
//! Immutable descriptor of one child task to create.

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, BatchResult};

/// Title and hour estimates for a single child task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub title: String,
    #[serde(alias = "estimated")]
    pub estimated_hours: f64,
    #[serde(alias = "remaining")]
    pub remaining_hours: f64,
}

impl TaskDetail {
    pub fn new(title: impl Into<String>, estimated_hours: f64, remaining_hours: f64) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            remaining_hours,
        }
    }

    /// Reject descriptors the service would refuse or misrecord
    ///
    /// Titles must be non-blank and both hour values finite and non-negative.
    pub fn validate(&self) -> BatchResult<()> {
        if self.title.trim().is_empty() {
            return Err(self.invalid("title must not be empty"));
        }
        for (name, hours) in [
            ("estimated_hours", self.estimated_hours),
            ("remaining_hours", self.remaining_hours),
        ] {
            if !hours.is_finite() || hours < 0.0 {
                return Err(self.invalid(format!(
                    "{name} must be a non-negative number, got {hours}"
                )));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> BatchError {
        BatchError::InvalidTask {
            title: self.title.clone(),
            reason: reason.into(),
        }
    }

    /// The standard breakdown for a user story, in submission order
    pub fn standard_breakdown() -> Vec<TaskDetail> {
        vec![
            Self::new("Analysis: On user story requirements & dependencies", 2.00, 2.00),
            Self::new(
                "HMRC LLD: Analysis, development approach, LLD document update",
                3.00,
                3.00,
            ),
            Self::new("ERD: Database table design & discussion", 2.00, 2.00),
            Self::new("UI: Call API endpoint & create model", 3.00, 3.00),
            Self::new("UI: Component development", 4.00, 4.00),
            Self::new("UI: Unit test", 2.00, 2.00),
            Self::new(
                "Compliance APIM: Add details of new operations in APIM",
                1.00,
                1.00,
            ),
            Self::new("Compliance API: Endpoint operation development", 4.00, 4.00),
            Self::new(
                "Compliance xUnit: Unit test code coverage for new development",
                4.00,
                4.00,
            ),
            Self::new("HMRC APIM: Add details of new operations in APIM", 1.00, 1.00),
            Self::new("HMRC API: Endpoint operation development", 4.00, 4.00),
            Self::new(
                "HMRC xUnit: Unit test code coverage for new development",
                4.00,
                4.00,
            ),
            Self::new(
                "Functional test: Test functionality after deployment",
                2.00,
                2.00,
            ),
            Self::new("Raise PR, fix review comment", 2.00, 2.00),
        ]
    }
}
