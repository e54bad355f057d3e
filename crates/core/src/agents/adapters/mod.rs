//! Reasoning runtime implementations.

pub mod command;
pub mod scripted;

pub use command::CommandRuntime;
pub use scripted::ScriptedRuntime;
