// Per-task lifecycle: Pending -> Submitted -> {Created | Failed}

pub mod events;
pub mod states;
pub mod task_state_machine;

pub use events::TaskEvent;
pub use states::TaskState;
pub use task_state_machine::TaskStateMachine;
