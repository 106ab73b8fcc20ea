use tracing::debug;

use super::events::TaskEvent;
use super::states::TaskState;
use crate::error::{BatchError, BatchResult};

/// In-memory state machine for one child task
///
/// `Pending -> Submitted -> {Created | Failed}`, plus `Pending -> Failed` for
/// descriptors rejected before submission. Nothing leaves a terminal state.
#[derive(Debug, Clone)]
pub struct TaskStateMachine {
    title: String,
    state: TaskState,
}

impl TaskStateMachine {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: TaskState::Pending,
        }
    }

    pub fn current_state(&self) -> TaskState {
        self.state
    }

    /// Apply an event, returning the new state
    pub fn transition(&mut self, event: &TaskEvent) -> BatchResult<TaskState> {
        let target = Self::determine_target_state(self.state, event)?;

        debug!(
            task = %self.title,
            from = %self.state,
            to = %target,
            event = event.event_type(),
            "Task state transition"
        );

        self.state = target;
        Ok(target)
    }

    fn determine_target_state(current: TaskState, event: &TaskEvent) -> BatchResult<TaskState> {
        let target = match (current, event) {
            (TaskState::Pending, TaskEvent::Submit) => TaskState::Submitted,
            (TaskState::Submitted, TaskEvent::Create(_)) => TaskState::Created,
            (TaskState::Submitted, TaskEvent::Fail(_)) => TaskState::Failed,
            (TaskState::Pending, TaskEvent::Fail(_)) => TaskState::Failed,
            (from, _) => {
                return Err(BatchError::StateTransition {
                    from: from.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}
