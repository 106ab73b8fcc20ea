//! # Task Builder/Submitter
//!
//! Builds the field-update document for one child task and submits it.
//! Every outcome is reported on its own; a failed submission is logged and
//! returned as a `Failed` outcome, never propagated to the caller.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::context_resolver::ParentContext;
use crate::client::WorkItemClient;
use crate::constants::{fields, links, relations, TASK_WORK_ITEM_TYPE};
use crate::error::{BatchError, BatchResult};
use crate::logging::log_task_operation;
use crate::models::{PatchDocument, TaskDetail, WorkItem};
use crate::state_machine::{TaskEvent, TaskState, TaskStateMachine};

/// Result of processing one task descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub title: String,
    pub state: TaskState,
    pub work_item_id: Option<i64>,
    pub html_link: Option<String>,
    pub error: Option<String>,
}

impl TaskOutcome {
    pub fn is_created(&self) -> bool {
        self.state == TaskState::Created
    }

    pub fn is_failed(&self) -> bool {
        self.state == TaskState::Failed
    }
}

/// Compose the field-update document for a child task
///
/// Title and estimates come from the descriptor; the parent link and the
/// classification fields come from the parent snapshot.
pub fn build_task_document(parent: &ParentContext, task: &TaskDetail) -> PatchDocument {
    PatchDocument::new()
        .add_field(fields::TITLE, task.title.as_str())
        .add_field(fields::ORIGINAL_ESTIMATE, task.estimated_hours)
        .add_field(fields::REMAINING_WORK, task.remaining_hours)
        .add_relation(relations::HIERARCHY_REVERSE, &parent.self_link)
        .add_field(fields::ITERATION_PATH, parent.iteration_path.as_str())
        .add_field(fields::AREA_PATH, parent.area_path.as_str())
        .add_field(fields::TEAM_PROJECT, parent.team_project.as_str())
}

/// Create a `Task` work item under the parent
pub async fn create_task(
    client: &dyn WorkItemClient,
    parent: &ParentContext,
    task: &TaskDetail,
) -> TaskOutcome {
    submit_task(client, parent, task, TASK_WORK_ITEM_TYPE).await
}

/// Create a child work item of the given type under the parent
pub async fn submit_task(
    client: &dyn WorkItemClient,
    parent: &ParentContext,
    task: &TaskDetail,
    work_item_type: &str,
) -> TaskOutcome {
    let mut machine = TaskStateMachine::new(task.title.as_str());

    match send_creation_request(client, parent, task, work_item_type, &mut machine).await {
        Ok((id, created)) => {
            let html_link = created.link_href(links::HTML).ok().map(str::to_string);
            let state = advance(&mut machine, &TaskEvent::Create(id));

            info!(work_item_id = id, "Task Successfully Created: Task #{}", id);
            match &html_link {
                Some(link) => info!(work_item_id = id, "Task Successfully Created: Task Link {}", link),
                None => warn!(work_item_id = id, "Created task has no html link"),
            }
            log_task_operation("create_task", &task.title, state, Some(id), html_link.as_deref());

            TaskOutcome {
                title: task.title.clone(),
                state,
                work_item_id: Some(id),
                html_link,
                error: None,
            }
        }
        Err(e) => {
            let message = match e {
                BatchError::TaskCreation { message, .. } => message,
                other => other.to_string(),
            };
            let state = advance(&mut machine, &TaskEvent::Fail(message.clone()));

            error!(task = %task.title, "Error creating Task: {}", message);
            log_task_operation("create_task", &task.title, state, None, Some(&message));

            TaskOutcome {
                title: task.title.clone(),
                state,
                work_item_id: None,
                html_link: None,
                error: Some(message),
            }
        }
    }
}

async fn send_creation_request(
    client: &dyn WorkItemClient,
    parent: &ParentContext,
    task: &TaskDetail,
    work_item_type: &str,
    machine: &mut TaskStateMachine,
) -> BatchResult<(i64, WorkItem)> {
    task.validate()?;
    let document = build_task_document(parent, task);

    machine.transition(&TaskEvent::Submit)?;
    let created = client
        .create_work_item(&document, &parent.team_project, work_item_type)
        .await
        .map_err(|e| BatchError::TaskCreation {
            title: task.title.clone(),
            message: e.service_message(),
        })?;

    let id = created.id.ok_or_else(|| BatchError::TaskCreation {
        title: task.title.clone(),
        message: "service response did not include a work item id".to_string(),
    })?;

    Ok((id, created))
}

/// Apply a transition, treating a rejected transition as a failure
fn advance(machine: &mut TaskStateMachine, event: &TaskEvent) -> TaskState {
    machine.transition(event).unwrap_or_else(|e| {
        error!(error = %e, "Rejected task state transition");
        TaskState::Failed
    })
}

/// Build and log a task document without submitting it
pub fn preview_task(parent: &ParentContext, task: &TaskDetail) -> TaskOutcome {
    if let Err(e) = task.validate() {
        let message = e.to_string();
        error!(task = %task.title, "Skipping invalid task: {}", message);
        return TaskOutcome {
            title: task.title.clone(),
            state: TaskState::Failed,
            work_item_id: None,
            html_link: None,
            error: Some(message),
        };
    }

    let document = build_task_document(parent, task);
    match serde_json::to_string(&document) {
        Ok(json) => info!(task = %task.title, document = %json, "Dry run: task not submitted"),
        Err(e) => error!(
            task = %task.title,
            error = %e,
            "Dry run: failed to serialize task document"
        ),
    }

    TaskOutcome {
        title: task.title.clone(),
        state: TaskState::Pending,
        work_item_id: None,
        html_link: None,
        error: None,
    }
}
