//! Crew configuration models for `.crew-kit/crews/*.yaml`.
//!
//! A crew definition is an ordered list of tasks. Each task names its owning
//! agent and the earlier tasks whose results it consumes as context.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Scheduling policy for a crew run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
pub enum Process {
    /// One task at a time, in declaration order.
    #[default]
    Sequential,

    /// Tasks whose dependencies have all completed run side by side.
    Concurrent,
}

impl Process {
    pub fn as_str(self) -> &'static str {
        match self {
            Process::Sequential => "sequential",
            Process::Concurrent => "concurrent",
        }
    }
}

impl std::fmt::Display for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single unit of work inside a crew definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct TaskDefinition {
    /// Name other tasks use to list this one as context.
    pub name: String,

    /// Role of the agent that performs the task.
    pub agent: String,

    /// Instruction for the agent. May contain `{placeholder}` tokens that
    /// are filled from the run inputs.
    pub description: String,

    /// Human-readable contract describing the shape of the result.
    pub expected_output: String,

    /// Names of earlier tasks whose results are passed as context, in order.
    #[serde(default)]
    pub context: Vec<String>,
}

/// Defines a full crew: its tasks and, optionally, its execution policy.
///
/// # Example
///
/// ```yaml
/// name: ml-assistant
/// description: Turn a problem statement and a dataset into starter code
/// tasks:
///   - name: define-problem
///     agent: Problem_Definition_Agent
///     description: "Clarify the problem: {question}"
///     expected-output: A concise problem definition.
///   - name: assess-data
///     agent: Data_Assessment_Agent
///     description: "Assess {file_name}"
///     expected-output: A data assessment.
///     context:
///       - define-problem
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct CrewDefinition {
    /// Unique name identifying this crew.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Overrides the global execution policy when present.
    #[serde(default)]
    pub process: Option<Process>,

    /// Tasks in declaration order.
    pub tasks: Vec<TaskDefinition>,
}
