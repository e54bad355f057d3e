//! # ck-core
//!
//! Crew engine, agent step tracing and configuration for crew-kit.
//!
//! ## Modules
//!
//! - [`trace`]: parse agent action text and classify steps into display events
//! - [`agents`]: agents, the reasoning runtime trait and its implementations
//! - [`crew`]: tasks, crews and the definition builder
//! - [`engine`]: runs a crew under the sequential or concurrent policy
//! - [`state`]: per-run state transitions
//! - [`config`]: `.crew-kit/` loading
//! - [`init`]: `.crew-kit/` generation from embedded templates
//! - [`inputs`]: run inputs derived from a dataset

pub mod agents;
pub mod config;
pub mod crew;
pub mod engine;
pub mod init;
pub mod inputs;
pub mod state;
pub mod trace;
