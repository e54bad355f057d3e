//! Error types for crew validation and execution.

use crate::agents::base::RuntimeError;
use ck_protocol::run_models::TaskOutput;
use ck_protocol::step_models::DisplayEvent;
use thiserror::Error;

/// A crew that cannot be run. Raised when the crew is built, never during a
/// run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Crew '{crew}' has no tasks")]
    EmptyCrew { crew: String },

    #[error("Agent role '{role}' is declared more than once")]
    DuplicateAgent { role: String },

    #[error("Task '{name}' is declared more than once")]
    DuplicateTask { name: String },

    #[error("Task '{task}' is assigned to agent '{role}', which is not part of the crew")]
    UnknownAgent { task: String, role: String },

    #[error("Task '{task}' depends on '{dependency}', which is not part of the crew")]
    UnknownDependency { task: String, dependency: String },

    #[error("Task '{task}' depends on '{dependency}', which is not declared before it")]
    ForwardReference { task: String, dependency: String },
}

/// Failure of a single task invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task '{task}' has already been executed")]
    AlreadyExecuted { task: String },

    #[error("Task '{task}' needs the result of '{dependency}', which has not completed")]
    DependencyPending { task: String, dependency: String },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Task aborted: {0}")]
    Aborted(String),
}

/// A task failed during a run; the remaining tasks were not executed.
#[derive(Error, Debug)]
#[error("Task '{task_name}' (#{task_index}, agent {agent_role}) failed: {source}")]
pub struct TaskExecutionError {
    pub task_index: usize,
    pub task_name: String,
    pub agent_role: String,

    /// Context the failing task had been given.
    pub context: Vec<String>,

    /// Outputs of the tasks that finished before the failure, in declaration
    /// order.
    pub completed: Vec<TaskOutput>,

    /// Every display event emitted in the run up to the failure.
    pub transcript: Vec<DisplayEvent>,

    pub source: TaskError,
}

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("Invalid crew: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    TaskExecution(Box<TaskExecutionError>),
}

impl From<TaskExecutionError> for CrewError {
    fn from(error: TaskExecutionError) -> Self {
        CrewError::TaskExecution(Box::new(error))
    }
}
