//! # Task Creation Workflow
//!
//! Context resolution, per-task submission and the batch driver tying them
//! together.

pub mod batch_runner;
pub mod context_resolver;
pub mod task_submitter;

pub use batch_runner::{exit_code_for_error, run_batch, BatchReport};
pub use context_resolver::{fetch_parent_context, ParentContext};
pub use task_submitter::{build_task_document, create_task, preview_task, submit_task, TaskOutcome};
