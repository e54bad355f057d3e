//! Best-effort field extraction from an agent's action text.
//!
//! Action text looks like the debug rendering of an agent action:
//!
//! ```text
//! tool='web search' tool_input='{"query": "gradient boosting"}' log='Thought: I need papers
//! Action: web search'
//! ```
//!
//! Nothing guarantees that the text is well formed, so every extractor
//! returns `None` when its pattern does not match and never fails.

use regex::Regex;
use std::sync::LazyLock;

static TOOL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"tool='(.*?)'").ok());

/// The value may span lines and contain quotes. It ends at the first quote
/// that is immediately followed by whitespace or a comma; a quote followed by
/// anything else (`it's`, `'a'}`) belongs to the value.
static TOOL_INPUT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)tool_input='(.*?)'[\s,]").ok());

static THOUGHT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Thought:\s*(.*?)(?:\n|$)").ok());

/// Fields recovered from one action text. Any subset may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAction {
    pub thought: Option<String>,
    pub tool: Option<String>,
    pub tool_input: Option<String>,
}

impl ParsedAction {
    pub fn is_empty(&self) -> bool {
        self.thought.is_none() && self.tool.is_none() && self.tool_input.is_none()
    }
}

fn first_capture(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    let captured = pattern
        .as_ref()?
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if captured.is_none() {
        tracing::trace!(pattern = ?pattern.as_ref().map(Regex::as_str), "no match in action text");
    }
    captured
}

/// Name of the tool the agent invoked, from the first `tool='...'`.
pub fn extract_tool(action: &str) -> Option<String> {
    first_capture(&TOOL_PATTERN, action)
}

/// The tool input from `tool_input='...'`, trimmed.
pub fn extract_tool_input(action: &str) -> Option<String> {
    first_capture(&TOOL_INPUT_PATTERN, action).map(|value| value.trim().to_string())
}

/// The text after `Thought:` up to the end of that line, trimmed.
pub fn extract_thought(action: &str) -> Option<String> {
    first_capture(&THOUGHT_PATTERN, action).map(|value| value.trim().to_string())
}

/// Runs all three extractors independently.
pub fn parse_action(action: &str) -> ParsedAction {
    ParsedAction {
        thought: extract_thought(action),
        tool: extract_tool(action),
        tool_input: extract_tool_input(action),
    }
}
