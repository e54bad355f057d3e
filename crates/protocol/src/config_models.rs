//! Global configuration models for `.crew-kit/config.toml`.
//!
//! This module defines the structure of the global configuration file that
//! controls project-wide settings for crew-kit.

use crate::crew_models::Process;
use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Default capacity of the engine's event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 100;

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

/// Represents global settings from `.crew-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .crew-kit/config.toml
/// process = "sequential"
/// event-buffer = 100
///
/// [runtime]
/// command = "python3"
/// args = ["scripts/runtime.py"]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Execution policy used when a crew does not override it.
    #[serde(default)]
    pub process: Process,

    /// Capacity of the bounded event channel between engine and sink.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// External reasoning runtime invoked once per task.
    #[serde(default)]
    pub runtime: Option<RuntimeConfig>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            process: Process::default(),
            event_buffer: DEFAULT_EVENT_BUFFER,
            runtime: None,
        }
    }
}

/// Command line of an external reasoning runtime.
///
/// The command receives one task request as a JSON line on stdin and
/// answers with one raw step per line on stdout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct RuntimeConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}
