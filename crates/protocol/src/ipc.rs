//! Engine-to-sink communication protocol.
//!
//! The engine reports everything that happens during a crew run as an
//! [`Event`] on a bounded channel. A rendering sink consumes the channel in
//! order; the engine never waits on the sink beyond the channel send.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::run_models::RunStatus;
use crate::step_models::DisplayEvent;

/// Events sent from the engine to a rendering sink.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "taskStarted",
///   "payload": {
///     "run_id": "uuid-here",
///     "task_index": 1,
///     "task_name": "assess-data",
///     "agent_role": "Data_Assessment_Agent"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A crew run has been started.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        crew_name: String,
        task_count: usize,
    },

    /// A run's status has changed.
    RunStatusUpdate {
        #[ts(type = "string")]
        run_id: Uuid,
        status: RunStatus,
        task_index: usize,
    },

    /// A task has been handed to its agent.
    TaskStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        task_index: usize,
        task_name: String,
        agent_role: String,
    },

    /// An agent reported progress on a task.
    Step {
        #[ts(type = "string")]
        run_id: Uuid,
        task_index: usize,
        event: DisplayEvent,
    },

    /// A task produced its result.
    TaskCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
        task_index: usize,
        task_name: String,
        output: String,
    },

    /// A run has produced a progress line.
    RunLog {
        #[ts(type = "string")]
        run_id: Uuid,
        content: String,
    },

    /// Every task of the run has completed.
    RunCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// A task failed; no further tasks will run.
    RunFailed {
        #[ts(type = "string")]
        run_id: Uuid,
        task_index: usize,
        task_name: String,
        error: String,
    },
}
