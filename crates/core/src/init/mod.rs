//! Initialization of `.crew-kit` directories.
//!
//! `crew init` writes a global `config.toml`, the agent personas and the
//! crews from templates embedded in the binary.
//!
//! # Example
//!
//! ```no_run
//! use ck_core::init::{InitOptions, generate_crew_kit_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: true,
//! };
//!
//! generate_crew_kit_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_crew_kit_structure, InitOptions};
pub use templates::{get_template, list_templates};
