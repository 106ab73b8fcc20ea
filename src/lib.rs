#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Work Item Batch
//!
//! Creates a fixed batch of child `Task` work items under one parent work item
//! in Azure DevOps Boards.
//!
//! ## Overview
//!
//! The parent is fetched once and its iteration path, area path and team
//! project are copied onto every child, together with a child-to-parent
//! hierarchy link and the per-task title and hour estimates. Each child is
//! created with its own request; one failed request never stops the others.
//!
//! ## Module Organization
//!
//! - [`orchestration`] - Context resolution, task submission, batch driver
//! - [`client`] - The work item client capability and its REST implementation
//! - [`models`] - Work items, task descriptors, field-update documents
//! - [`state_machine`] - Per-task lifecycle
//! - [`config`] - Batch configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use workitem_batch::{run_batch, BatchConfig, RestClientConfig, RestWorkItemClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BatchConfig {
//!     org_url: "https://dev.azure.com/contoso".to_string(),
//!     credential: std::env::var("WORKITEM_BATCH_PAT")?,
//!     parent_id: 4711,
//!     ..Default::default()
//! };
//! let client = RestWorkItemClient::new(RestClientConfig::from(&config))?;
//!
//! let report = run_batch(&client, &config).await?;
//! println!("{} created, {} failed", report.created_count(), report.failed_count());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod state_machine;

pub use client::{RestClientConfig, RestWorkItemClient, WorkItemClient};
pub use config::BatchConfig;
pub use error::{BatchError, BatchResult, ClientError, ClientResult, MissingFieldError};
pub use models::{PatchDocument, TaskDetail, WorkItem};
pub use orchestration::{
    build_task_document, create_task, fetch_parent_context, run_batch, BatchReport,
    ParentContext, TaskOutcome,
};
pub use state_machine::TaskState;
