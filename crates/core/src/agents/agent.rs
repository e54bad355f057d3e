//! Agent identity, capabilities and step routing.

use crate::agents::base::AgentProfile;
use crate::trace::build_events;
use ck_protocol::agent_models::{AgentDefinition, DEFAULT_AVATAR};
use ck_protocol::step_models::{DisplayEvent, RawStep};
use std::fmt;
use std::sync::Arc;

/// Hook invoked with every raw step an agent reports, including the final one.
pub type StepCallback = Arc<dyn Fn(&RawStep) + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentPolicy {
    /// Whether the agent may hand work to another agent. Passed through to
    /// the runtime; the engine itself never delegates.
    pub allow_delegation: bool,
    /// Log every routed step at debug level.
    pub verbose: bool,
}

/// A named actor that performs the reasoning steps of its tasks.
///
/// Agents are built once per crew run and shared between tasks through
/// `Arc`. The only state they carry is the registered step callback.
#[derive(Clone)]
pub struct Agent {
    role: String,
    goal: String,
    backstory: String,
    avatar: String,
    tools: Vec<String>,
    policy: AgentPolicy,
    step_callback: Option<StepCallback>,
}

impl Agent {
    pub fn new(role: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            tools: Vec::new(),
            policy: AgentPolicy::default(),
            step_callback: None,
        }
    }

    /// Build an agent from its `.crew-kit/agents/*.md` definition.
    pub fn from_definition(definition: &AgentDefinition) -> Self {
        Self::new(definition.role.clone(), definition.goal.clone())
            .with_backstory(definition.backstory.trim())
            .with_avatar(definition.avatar.clone())
            .with_tools(definition.tools.iter().cloned())
            .with_policy(AgentPolicy {
                allow_delegation: definition.allow_delegation,
                verbose: definition.verbose,
            })
    }

    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Add tool capabilities. Duplicate names are kept once.
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tool in tools {
            let tool = tool.into();
            if !self.tools.contains(&tool) {
                self.tools.push(tool);
            }
        }
        self
    }

    pub fn with_policy(mut self, policy: AgentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register the hook called once per reasoning step and once more with
    /// the final result. Replaces any previously registered hook.
    pub fn with_step_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RawStep) + Send + Sync + 'static,
    {
        self.step_callback = Some(Arc::new(callback));
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool == name)
    }

    pub fn policy(&self) -> AgentPolicy {
        self.policy
    }

    pub fn profile(&self) -> AgentProfile {
        AgentProfile {
            role: self.role.clone(),
            goal: self.goal.clone(),
            backstory: self.backstory.clone(),
            tools: self.tools.clone(),
            allow_delegation: self.policy.allow_delegation,
        }
    }

    /// Route one reported step: classify it into display events for this
    /// agent, notify the registered callback, and hand the events back for
    /// forwarding to the sink.
    pub fn on_step(&self, step: &RawStep) -> Vec<DisplayEvent> {
        let events = build_events(step, &self.role, &self.avatar);
        if self.policy.verbose {
            tracing::debug!(
                agent = %self.role,
                events = events.len(),
                is_final = step.is_final(),
                "agent step"
            );
        }
        if let Some(callback) = &self.step_callback {
            callback(step);
        }
        events
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("role", &self.role)
            .field("avatar", &self.avatar)
            .field("tools", &self.tools)
            .field("policy", &self.policy)
            .field("has_step_callback", &self.step_callback.is_some())
            .finish()
    }
}
