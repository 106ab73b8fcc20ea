//! # Batch Runner
//!
//! Drives one batch: resolve the parent once, then process every task
//! descriptor in declared order. A context failure stops the batch before any
//! submission; a task failure only affects that task. Nothing is rolled back.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use super::context_resolver::{fetch_parent_context, ParentContext};
use super::task_submitter::{preview_task, submit_task, TaskOutcome};
use crate::client::WorkItemClient;
use crate::config::BatchConfig;
use crate::constants::exit_codes;
use crate::error::{BatchError, BatchResult};
use crate::state_machine::TaskState;

/// Per-task outcomes of a completed batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub parent: ParentContext,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    pub fn created_count(&self) -> usize {
        self.count(TaskState::Created)
    }

    pub fn failed_count(&self) -> usize {
        self.count(TaskState::Failed)
    }

    pub fn pending_count(&self) -> usize {
        self.count(TaskState::Pending)
    }

    fn count(&self, state: TaskState) -> usize {
        self.outcomes.iter().filter(|o| o.state == state).count()
    }

    /// True when no task failed
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Process exit status for this report
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            exit_codes::SUCCESS
        } else {
            exit_codes::PARTIAL_FAILURE
        }
    }
}

/// Process exit status for a batch that never got past context resolution
pub fn exit_code_for_error(error: &BatchError) -> u8 {
    debug_assert!(error.is_fatal(), "run_batch only returns context errors");
    exit_codes::PARENT_UNRESOLVED
}

/// Run a full batch against `client` as described by `config`
pub async fn run_batch(
    client: &dyn WorkItemClient,
    config: &BatchConfig,
) -> BatchResult<BatchReport> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("batch", run_id = %run_id, parent_id = config.parent_id);

    async move {
        let started_at = Utc::now();
        let parent = fetch_parent_context(client, config.parent_id).await?;

        info!(
            tasks = config.tasks.len(),
            dry_run = config.dry_run,
            max_concurrent_submissions = config.max_concurrent_submissions,
            "Creating child tasks"
        );

        let outcomes: Vec<TaskOutcome> = if config.dry_run {
            config
                .tasks
                .iter()
                .map(|task| preview_task(&parent, task))
                .collect()
        } else {
            stream::iter(config.tasks.iter())
                .map(|task| submit_task(client, &parent, task, &config.work_item_type))
                .buffered(config.max_concurrent_submissions.max(1))
                .collect()
                .await
        };

        let report = BatchReport {
            run_id,
            parent,
            dry_run: config.dry_run,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };

        if report.is_success() {
            info!(
                created = report.created_count(),
                pending = report.pending_count(),
                "Batch finished"
            );
        } else {
            warn!(
                created = report.created_count(),
                failed = report.failed_count(),
                "Batch finished with failures"
            );
        }

        Ok::<_, BatchError>(report)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(states: &[TaskState]) -> BatchReport {
        BatchReport {
            run_id: Uuid::new_v4(),
            parent: ParentContext {
                id: 1,
                self_link: "https://parent".to_string(),
                iteration_path: "P\\S".to_string(),
                area_path: "P\\A".to_string(),
                team_project: "P".to_string(),
            },
            dry_run: false,
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcomes: states
                .iter()
                .enumerate()
                .map(|(i, state)| TaskOutcome {
                    title: format!("task {i}"),
                    state: *state,
                    work_item_id: None,
                    html_link: None,
                    error: None,
                })
                .collect(),
        }
    }

    #[test]
    fn exit_codes_follow_outcomes() {
        assert_eq!(report(&[TaskState::Created, TaskState::Created]).exit_code(), 0);
        assert_eq!(report(&[TaskState::Pending]).exit_code(), 0);
        assert_eq!(report(&[TaskState::Created, TaskState::Failed]).exit_code(), 3);
    }

    #[test]
    fn counters() {
        let report = report(&[TaskState::Created, TaskState::Failed, TaskState::Created]);
        assert_eq!(report.created_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn context_errors_map_to_parent_unresolved() {
        assert_eq!(exit_code_for_error(&BatchError::NoParentConfigured), 2);
        assert_eq!(
            exit_code_for_error(&BatchError::ContextResolution {
                parent_id: 9,
                message: "TF401232".to_string(),
            }),
            2
        );
    }
}
