//! Runtime crew-run state models.
//!
//! This module defines the structures for tracking one execution of a crew
//! and the outputs it produces.

use crate::step_models::DisplayEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Represents the lifecycle status of a crew run.
///
/// Pending -> Running -> Completed, or Running -> Failed when a task's
/// reasoning runtime reports an error.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run has been created but no task has started.
    Pending,

    /// Tasks are executing.
    Running,

    /// Every task produced a result.
    Completed,

    /// A task failed and the remaining tasks were abandoned.
    Failed,
}

/// The completed result of one task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct TaskOutput {
    pub task_name: String,
    pub agent_role: String,
    pub description: String,
    /// The agent's final answer, verbatim.
    pub raw: String,
}

/// Everything a successful run produced.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct CrewOutput {
    #[ts(type = "string")]
    pub run_id: Uuid,

    /// One output per task, in declaration order.
    pub tasks_output: Vec<TaskOutput>,

    /// Every display event emitted during the run.
    pub transcript: Vec<DisplayEvent>,
}

impl CrewOutput {
    /// The output of the last declared task.
    pub fn final_output(&self) -> Option<&str> {
        self.tasks_output.last().map(|output| output.raw.as_str())
    }
}

/// Represents the runtime state of a single crew execution.
///
/// Owned by one kickoff; nothing in it outlives the run.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct CrewRun {
    /// Unique identifier for this run.
    #[ts(type = "string")]
    pub id: Uuid,

    /// Name of the crew being executed.
    pub crew_name: String,

    pub status: RunStatus,

    /// Index of the task most recently started.
    pub current_task: usize,

    /// Human-readable progress lines.
    pub logs: Vec<String>,

    /// Display events emitted so far, in emission order.
    pub transcript: Vec<DisplayEvent>,

    pub started_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,
}
