//! Directory structure and file generation for `.crew-kit` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Templates written by `--minimal`, besides `config.toml`.
const MINIMAL_TEMPLATES: [&str; 2] = ["agents/problem-definition.md", "crews/define-problem.yaml"];

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Directory in which `.crew-kit/` is created.
    pub target_dir: PathBuf,

    /// Write over an existing `.crew-kit/` directory.
    pub force: bool,

    /// Only the problem-definition agent and its one-task crew.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.crew-kit` directory from the embedded templates.
///
/// ```text
/// .crew-kit/
/// ├── config.toml
/// ├── agents/
/// │   ├── problem-definition.md
/// │   └── ... five more unless minimal
/// └── crews/
///     ├── define-problem.yaml
///     └── ml-assistant.yaml (unless minimal)
/// ```
///
/// Returns the written files, relative to `.crew-kit/`.
///
/// # Example
/// ```no_run
/// use ck_core::init::{InitOptions, generate_crew_kit_structure};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = InitOptions {
///     target_dir: PathBuf::from("."),
///     force: false,
///     minimal: false,
/// };
///
/// generate_crew_kit_structure(options).await?;
/// # Ok(())
/// # }
/// ```
pub async fn generate_crew_kit_structure(options: InitOptions) -> InitResult<Vec<String>> {
    let ck_dir = options.target_dir.join(CONFIG_DIR);

    if ck_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(ck_dir));
    }

    for sub_dir in ["agents", "crews"] {
        let path = ck_dir.join(sub_dir);
        fs::create_dir_all(&path).map_err(|source| InitError::DirectoryCreate { path, source })?;
    }

    let mut templates = vec!["config.toml".to_string()];
    if options.minimal {
        templates.extend(MINIMAL_TEMPLATES.iter().map(|path| path.to_string()));
    } else {
        templates.extend(list_templates("agents/"));
        templates.extend(list_templates("crews/"));
    }

    for template_path in &templates {
        write_template_file(&ck_dir, template_path)?;
    }

    tracing::info!(
        path = %ck_dir.display(),
        files = templates.len(),
        "Initialized crew-kit configuration"
    );

    Ok(templates)
}

fn write_template_file(ck_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = ck_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}
