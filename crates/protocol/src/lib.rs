//! # ck-protocol
//!
//! Core protocol definitions and data models for crew-kit.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (YAML crews, TOML config, Markdown agents)
//! - Agent step traces and the display events derived from them
//! - Runtime crew-run state and task outputs
//! - The event stream sent from the engine to a rendering sink
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent definition structures
//! - [`config_models`]: Global configuration from config.toml
//! - [`crew_models`]: Crew and task definitions, execution policy
//! - [`step_models`]: Raw agent steps and display events
//! - [`run_models`]: Runtime crew-run state and outputs
//! - [`ipc`]: Events for engine-to-sink communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other crew-kit crates

pub mod agent_models;
pub mod config_models;
pub mod crew_models;
pub mod ipc;
pub mod run_models;
pub mod step_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use crew_models::*;
pub use ipc::*;
pub use run_models::*;
pub use step_models::*;
