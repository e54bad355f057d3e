//! The aggregated project configuration.

use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::config_models::GlobalConfig;
use ck_protocol::crew_models::CrewDefinition;

/// Everything loaded from `.crew-kit/`.
///
/// # Example
///
/// ```rust,no_run
/// use ck_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} agents and {} crews",
///          config.agents.len(),
///          config.crews.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Agent definitions from `agents/*.md`, sorted by file name.
    pub agents: Vec<AgentDefinition>,

    /// Crew definitions from `crews/*.yaml`, sorted by file name.
    pub crews: Vec<CrewDefinition>,
}

impl AppConfig {
    pub fn find_crew(&self, name: &str) -> Option<&CrewDefinition> {
        self.crews.iter().find(|crew| crew.name == name)
    }

    pub fn find_agent(&self, role: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|agent| agent.role == role)
    }
}
