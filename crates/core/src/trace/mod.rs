//! Agent step-trace interpretation.
//!
//! Reasoning runtimes describe their progress in loosely structured text
//! produced by a language model. This module recovers what it can from that
//! text and turns every step into display events for a rendering sink.
//!
//! - [`parser`]: best-effort extraction of thought, tool and tool input
//! - [`classifier`]: observation classification and display-event building

pub mod classifier;
pub mod parser;

pub use classifier::{build_events, build_events_for_steps, classify_observation, ObservationKind};
pub use parser::{extract_thought, extract_tool, extract_tool_input, parse_action, ParsedAction};
