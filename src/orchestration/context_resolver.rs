//! # Context Resolver
//!
//! Fetches the parent work item once and extracts the fields every child
//! inherits. The resulting [`ParentContext`] is an immutable snapshot: all
//! children of a batch are stamped from it, even if the parent changes while
//! the batch runs.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::client::WorkItemClient;
use crate::constants::{fields, links, UNSET_PARENT_ID};
use crate::error::{BatchError, BatchResult};
use crate::models::WorkItem;

/// Read-only view of the parent work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentContext {
    pub id: i64,
    pub self_link: String,
    pub iteration_path: String,
    pub area_path: String,
    pub team_project: String,
}

impl ParentContext {
    /// Extract the context from a fetched work item
    ///
    /// `requested_id` is only used to report an item that came back without
    /// an id.
    pub fn from_work_item(item: &WorkItem, requested_id: i64) -> BatchResult<Self> {
        let id = item.id.ok_or(BatchError::MissingIdentity {
            parent_id: requested_id,
        })?;

        Ok(Self {
            id,
            self_link: item.link_href(links::SELF)?.to_string(),
            iteration_path: item.field_str(fields::ITERATION_PATH)?.to_string(),
            area_path: item.field_str(fields::AREA_PATH)?.to_string(),
            team_project: item.field_str(fields::TEAM_PROJECT)?.to_string(),
        })
    }
}

/// Fetch the parent work item and resolve its context
///
/// An unset parent id short-circuits without touching the client. Service
/// failures are logged and returned as [`BatchError::ContextResolution`].
pub async fn fetch_parent_context(
    client: &dyn WorkItemClient,
    parent_id: i64,
) -> BatchResult<ParentContext> {
    if parent_id == UNSET_PARENT_ID {
        warn!("No parent work item configured, nothing to do");
        return Err(BatchError::NoParentConfigured);
    }

    let item = client.fetch_work_item(parent_id).await.map_err(|e| {
        let message = e.service_message();
        error!(
            parent_id = parent_id,
            endpoint = %client.endpoint(),
            error = %message,
            "Failed to fetch parent work item"
        );
        BatchError::ContextResolution { parent_id, message }
    })?;

    let context = ParentContext::from_work_item(&item, parent_id).map_err(|e| {
        error!(parent_id = parent_id, error = %e, "Parent work item is incomplete");
        e
    })?;

    info!(
        parent_id = context.id,
        iteration_path = %context.iteration_path,
        area_path = %context.area_path,
        team_project = %context.team_project,
        "Resolved parent work item"
    );

    Ok(context)
}
