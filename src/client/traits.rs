//! # Work Item Client Trait
//!
//! The capability the task workflow needs from the tracking service. The
//! workflow only ever talks to this trait, so any transport (or an in-memory
//! double in tests) can stand behind it.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{PatchDocument, WorkItem};

/// Fetch and create operations against a work item tracking service
#[async_trait]
pub trait WorkItemClient: Send + Sync {
    /// Endpoint URL, for debugging/logging
    fn endpoint(&self) -> &str;

    /// Fetch a work item by id
    ///
    /// Fails with a [`crate::ClientError`] on not-found, authentication or
    /// network problems.
    async fn fetch_work_item(&self, id: i64) -> ClientResult<WorkItem>;

    /// Create a work item of `work_item_type` in `project` from a
    /// field-update document
    async fn create_work_item(
        &self,
        document: &PatchDocument,
        project: &str,
        work_item_type: &str,
    ) -> ClientResult<WorkItem>;
}
