//! Runtime factory for creating reasoning runtimes from configuration.

use crate::agents::adapters::{CommandRuntime, ScriptedRuntime};
use crate::agents::base::{ReasoningRuntime, RuntimeError};
use ck_protocol::config_models::GlobalConfig;
use std::path::Path;
use std::sync::Arc;

pub struct RuntimeFactory;

impl RuntimeFactory {
    /// Create the runtime a run should use.
    ///
    /// - `dry_run` always selects the [`ScriptedRuntime`]
    /// - a `[runtime]` table in `config.toml` selects a [`CommandRuntime`]
    ///   spawned in `working_dir`
    /// - anything else is `RuntimeError::NotAvailable`
    pub fn create(
        config: &GlobalConfig,
        working_dir: &Path,
        dry_run: bool,
    ) -> Result<Arc<dyn ReasoningRuntime>, RuntimeError> {
        if dry_run {
            tracing::info!("Using scripted runtime (dry run)");
            return Ok(Arc::new(ScriptedRuntime::new()));
        }

        match &config.runtime {
            Some(runtime) => {
                tracing::info!(command = %runtime.command, "Using command runtime");
                Ok(Arc::new(CommandRuntime::from_config(
                    runtime,
                    working_dir.to_string_lossy(),
                )))
            }
            None => Err(RuntimeError::NotAvailable(
                "no [runtime] configured in .crew-kit/config.toml (use --dry-run to run without one)"
                    .to_string(),
            )),
        }
    }
}
