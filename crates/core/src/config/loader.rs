//! Configuration file loader for the `.crew-kit/` directory.
//!
//! - `config.toml`: global settings
//! - `agents/*.md`: agent personas (YAML front matter, Markdown backstory)
//! - `crews/*.yaml` / `crews/*.yml`: crew definitions

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::config_models::GlobalConfig;
use ck_protocol::crew_models::CrewDefinition;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the configuration directory under a project root.
pub const CONFIG_DIR: &str = ".crew-kit";

/// Loads all configuration from `<root>/.crew-kit/`.
///
/// Missing directories or files yield defaults rather than errors.
///
/// # Errors
///
/// Returns `ConfigError` if a file exists but cannot be read, has invalid
/// syntax, misses required fields, or repeats an agent role or crew name
/// that another file already declared.
///
/// # Example
///
/// ```rust,no_run
/// use ck_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} agents", config.agents.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let ck_dir = root.join(CONFIG_DIR);

    if !ck_dir.exists() {
        tracing::debug!(path = %ck_dir.display(), "No configuration directory, using defaults");
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&ck_dir)?;
    let agents = load_agents(&ck_dir)?;
    let crews = load_crews(&ck_dir)?;

    tracing::debug!(
        agents = agents.len(),
        crews = crews.len(),
        "Loaded configuration"
    );

    Ok(AppConfig {
        global,
        agents,
        crews,
    })
}

fn load_global_config(ck_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = ck_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content = read_file(&config_path)?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if config.event_buffer == 0 {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: "event-buffer must be at least 1".to_string(),
        });
    }

    Ok(config)
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Files directly inside `dir` whose extension is one of `extensions`,
/// sorted by file name.
fn config_files(dir: &Path, extensions: &[&str]) -> ConfigResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches && entry.file_type().is_file() {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn load_agents(ck_dir: &Path) -> ConfigResult<Vec<AgentDefinition>> {
    let mut agents: Vec<AgentDefinition> = Vec::new();

    for path in config_files(&ck_dir.join("agents"), &["md"])? {
        let content = read_file(&path)?;

        let matter = Matter::<YAML>::new();
        let result = matter.parse(&content);

        let mut agent: AgentDefinition = result
            .data
            .ok_or_else(|| ConfigError::MarkdownParse {
                path: path.clone(),
                reason: "Missing YAML front matter".to_string(),
            })?
            .deserialize()
            .map_err(|e| ConfigError::MarkdownParse {
                path: path.clone(),
                reason: format!("Failed to deserialize front matter: {e}"),
            })?;

        if agent.role.trim().is_empty() {
            return Err(ConfigError::InvalidConfig {
                path,
                reason: "Agent role must not be empty".to_string(),
            });
        }
        if agents.iter().any(|other| other.role == agent.role) {
            return Err(ConfigError::InvalidConfig {
                path,
                reason: format!("Agent role '{}' is declared more than once", agent.role),
            });
        }

        agent.backstory = result.content;
        agents.push(agent);
    }

    Ok(agents)
}

fn load_crews(ck_dir: &Path) -> ConfigResult<Vec<CrewDefinition>> {
    let mut crews: Vec<CrewDefinition> = Vec::new();

    for path in config_files(&ck_dir.join("crews"), &["yaml", "yml"])? {
        let content = read_file(&path)?;

        let crew: CrewDefinition =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.clone(),
                source,
            })?;

        if crews.iter().any(|other| other.name == crew.name) {
            return Err(ConfigError::InvalidConfig {
                path,
                reason: format!("Crew '{}' is declared more than once", crew.name),
            });
        }

        crews.push(crew);
    }

    Ok(crews)
}
