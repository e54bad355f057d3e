//! Configuration loading and management.
//!
//! Everything a project configures lives in `.crew-kit/`: global settings,
//! agent personas and crew definitions.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, CONFIG_DIR};
pub use models::AppConfig;
