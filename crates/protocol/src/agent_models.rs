//! Agent definition models for `.crew-kit/agents/*.md`.
//!
//! Agents are defined as Markdown files with YAML front matter. The front
//! matter carries identity and capabilities, the body carries the backstory.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Avatar used when an agent definition does not declare one.
pub const DEFAULT_AVATAR: &str = "🤖";

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

/// Represents a specialized agent's definition.
///
/// # Example
///
/// ```markdown
/// ---
/// role: Researcher
/// goal: Gather papers and documentation relevant to the project.
/// avatar: "📚"
/// tools:
///   - web search
///   - Search Arxiv research papers
/// allow-delegation: false
/// ---
///
/// You are a seasoned researcher, adept at finding and synthesizing information.
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct AgentDefinition {
    /// Unique identifier for this agent.
    ///
    /// Tasks reference their owning agent by this role.
    pub role: String,

    /// What the agent is trying to achieve.
    pub goal: String,

    /// Glyph shown next to every display event the agent produces.
    #[serde(default = "default_avatar")]
    pub avatar: String,

    /// Names of tool capabilities the agent may invoke.
    #[serde(default)]
    pub tools: Vec<String>,

    /// Whether the agent may hand work to another agent.
    #[serde(default)]
    pub allow_delegation: bool,

    /// Log every reasoning step at debug level.
    #[serde(default)]
    pub verbose: bool,

    /// The Markdown body of the definition file.
    ///
    /// Skipped during serialization as it is not part of the front matter.
    #[serde(skip)]
    pub backstory: String,
}
