//! Step classification and display-event building.

use super::parser::parse_action;
use ck_protocol::step_models::{DisplayEvent, DisplayKind, RawStep};
use std::path::Path;

/// File extensions, lowercase and without the dot, rendered as images.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// How a sink should render a tool observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationKind {
    Image,
    Json,
    Text,
}

impl ObservationKind {
    pub fn display_kind(self) -> DisplayKind {
        match self {
            Self::Image => DisplayKind::ObservationImage,
            Self::Json => DisplayKind::ObservationJson,
            Self::Text => DisplayKind::ObservationText,
        }
    }
}

fn is_image_path(observation: &str) -> bool {
    Path::new(observation.trim())
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

fn is_valid_json(observation: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(observation).is_ok()
}

/// Classifies an observation. Total: every input maps to exactly one kind,
/// and the image-extension check wins over JSON validity.
pub fn classify_observation(observation: &str) -> ObservationKind {
    if is_image_path(observation) {
        ObservationKind::Image
    } else if is_valid_json(observation) {
        ObservationKind::Json
    } else {
        ObservationKind::Text
    }
}

/// Turns one step into display events attributed to `agent_role`.
///
/// An intermediate step yields its thought, tool and tool input (each only
/// when present, always in that order) followed by exactly one observation
/// event. An image observation carries the trimmed path; other observations
/// are passed through untouched. A bare step yields one markdown event, a final step one final
/// answer event.
pub fn build_events(step: &RawStep, agent_role: &str, avatar: &str) -> Vec<DisplayEvent> {
    let event = |kind: DisplayKind, payload: &str| DisplayEvent::new(agent_role, avatar, kind, payload);

    match step {
        RawStep::Intermediate {
            action,
            observation,
        } => {
            let parsed = parse_action(action);
            let mut events = Vec::with_capacity(4);
            if let Some(thought) = &parsed.thought {
                events.push(event(DisplayKind::Thought, thought));
            }
            if let Some(tool) = &parsed.tool {
                events.push(event(DisplayKind::ToolUsed, tool));
            }
            if let Some(tool_input) = &parsed.tool_input {
                events.push(event(DisplayKind::ToolInput, tool_input));
            }
            let kind = classify_observation(observation);
            // Image payloads are loaded as paths by the sink.
            let payload = match kind {
                ObservationKind::Image => observation.trim(),
                ObservationKind::Json | ObservationKind::Text => observation.as_str(),
            };
            events.push(event(kind.display_kind(), payload));
            events
        }
        RawStep::Bare { text } => vec![event(DisplayKind::RawMarkdown, text)],
        RawStep::Final { output } => vec![event(DisplayKind::FinalAnswer, output)],
    }
}

/// Builds events for a batch of steps, preserving the batch order.
pub fn build_events_for_steps(steps: &[RawStep], agent_role: &str, avatar: &str) -> Vec<DisplayEvent> {
    steps
        .iter()
        .flat_map(|step| build_events(step, agent_role, avatar))
        .collect()
}
