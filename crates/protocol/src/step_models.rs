//! Agent step traces and the display events derived from them.
//!
//! A reasoning runtime reports its progress as a sequence of [`RawStep`]s.
//! The engine turns every step into zero or more [`DisplayEvent`]s, which
//! are the only thing a rendering sink ever sees.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One increment of an agent's progress on a task.
///
/// Serialized with an internal `type` tag so that external runtimes can
/// write one step per JSON line:
///
/// ```json
/// {"type":"intermediate","action":"tool='web search' ...","observation":"..."}
/// {"type":"bare","text":"Looking into it"}
/// {"type":"final","output":"The problem is a binary classification"}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawStep {
    /// An action taken by the agent and what the invoked tool returned.
    ///
    /// `action` is free text that may contain `tool='...'`,
    /// `tool_input='...'` and `Thought:` fragments. `observation` is the
    /// tool's raw return value: text, a JSON document, or an image path.
    Intermediate { action: String, observation: String },

    /// A step that is not an action/observation pair.
    Bare { text: String },

    /// The agent's final answer for the task.
    Final { output: String },
}

impl RawStep {
    pub fn intermediate(action: impl Into<String>, observation: impl Into<String>) -> Self {
        Self::Intermediate {
            action: action.into(),
            observation: observation.into(),
        }
    }

    pub fn bare(text: impl Into<String>) -> Self {
        Self::Bare { text: text.into() }
    }

    pub fn final_answer(output: impl Into<String>) -> Self {
        Self::Final {
            output: output.into(),
        }
    }

    /// Whether this step terminates the task invocation.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }
}

/// What a display event carries, and therefore how a sink should render it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "camelCase")]
pub enum DisplayKind {
    Thought,
    ToolUsed,
    ToolInput,
    /// Payload is a path the sink should load as an image.
    ObservationImage,
    /// Payload is a JSON document the sink should render as structured data.
    ObservationJson,
    ObservationText,
    FinalAnswer,
    RawMarkdown,
}

/// One renderable unit, tagged with the agent that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEvent {
    pub agent_role: String,
    pub avatar: String,
    pub kind: DisplayKind,
    pub payload: String,
}

impl DisplayEvent {
    pub fn new(
        agent_role: impl Into<String>,
        avatar: impl Into<String>,
        kind: DisplayKind,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            agent_role: agent_role.into(),
            avatar: avatar.into(),
            kind,
            payload: payload.into(),
        }
    }
}
