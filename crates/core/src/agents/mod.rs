//! Agents and the reasoning runtimes they delegate to.
//!
//! An [`Agent`] is a persona (role, goal, backstory, tools). The actual
//! reasoning happens in a [`ReasoningRuntime`], which reports the steps it
//! takes; the agent turns each step into display events.

pub mod adapters;
pub mod agent;
pub mod base;
pub mod cli_executor;
pub mod factory;

pub use adapters::{CommandRuntime, ScriptedRuntime};
pub use agent::{Agent, AgentPolicy, StepCallback};
pub use base::{AgentProfile, ReasoningRuntime, RuntimeError, StepStream, TaskRequest};
pub use factory::RuntimeFactory;
