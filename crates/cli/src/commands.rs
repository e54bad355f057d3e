//! Subcommand implementations.

use crate::console;
use anyhow::{anyhow, bail, Context, Result};
use ck_core::agents::{ReasoningRuntime as _, RuntimeFactory};
use ck_core::config::{load_config, AppConfig};
use ck_core::crew::{build_crew, Crew, CrewError};
use ck_core::engine::CrewEngine;
use ck_core::init::{generate_crew_kit_structure, InitOptions};
use ck_core::inputs::DatasetPreview;
use ck_protocol::crew_models::{CrewDefinition, Process};
use clap::Args;
use colored::Colorize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

const NO_DATASET: &str = "(no dataset provided)";

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Crew name
    pub crew: String,

    /// The question the crew works on
    #[arg(short, long)]
    pub question: String,

    /// CSV dataset previewed into the task descriptions
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Use the scripted runtime instead of `[runtime]` from config.toml
    #[arg(long)]
    pub dry_run: bool,

    /// Run independent tasks at the same time
    #[arg(long)]
    pub concurrent: bool,
}

pub async fn init(root: &Path, force: bool, minimal: bool) -> Result<()> {
    let written = generate_crew_kit_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    println!("{} {}", "Created".green().bold(), root.join(ck_core::config::CONFIG_DIR).display());
    for path in written {
        println!("  {path}");
    }
    Ok(())
}

async fn load(root: &Path) -> Result<AppConfig> {
    load_config(root)
        .await
        .with_context(|| format!("Failed to load configuration from {}", root.display()))
}

fn find_crew<'a>(config: &'a AppConfig, name: &str) -> Result<&'a CrewDefinition> {
    config.find_crew(name).ok_or_else(|| {
        let known: Vec<&str> = config.crews.iter().map(|crew| crew.name.as_str()).collect();
        anyhow!("Crew '{name}' not found (available: {})", known.join(", "))
    })
}

pub async fn list(root: &Path) -> Result<()> {
    let config = load(root).await?;

    println!("{}", "Agents".bold());
    for agent in &config.agents {
        println!("  {} {}: {}", agent.avatar, console::title_case(&agent.role), agent.goal);
    }

    println!("{}", "Crews".bold());
    for crew in &config.crews {
        let process = crew.process.unwrap_or(config.global.process);
        println!(
            "  {} ({} task(s), {process}){}",
            crew.name,
            crew.tasks.len(),
            if crew.description.is_empty() {
                String::new()
            } else {
                format!(": {}", crew.description)
            }
        );
    }
    Ok(())
}

/// Inputs for every placeholder the bundled crews use, with the question
/// and dataset filled in when given.
fn run_inputs(question: &str, data: Option<&Path>) -> Result<HashMap<String, String>> {
    let mut inputs = match data {
        Some(path) => DatasetPreview::from_path(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?
            .into_inputs(),
        None => HashMap::from([
            ("file_name".to_string(), NO_DATASET.to_string()),
            ("columns".to_string(), NO_DATASET.to_string()),
            ("row_count".to_string(), "0".to_string()),
            ("data_preview".to_string(), NO_DATASET.to_string()),
        ]),
    };
    inputs.insert("question".to_string(), question.to_string());
    Ok(inputs)
}

fn describe(crew: &Crew) {
    for (index, task) in crew.tasks().iter().enumerate() {
        let dependencies: Vec<&str> = task.dependencies().iter().map(|dep| dep.name()).collect();
        let context = if dependencies.is_empty() {
            String::new()
        } else {
            format!(" <- {}", dependencies.join(", "))
        };
        println!(
            "  [{}] {} ({}){context}",
            index + 1,
            task.name(),
            console::title_case(task.agent().role())
        );
    }
}

pub async fn validate(root: &Path, name: &str) -> Result<()> {
    let config = load(root).await?;
    let definition = find_crew(&config, name)?;

    let inputs = run_inputs("<question>", None)?;
    let crew = build_crew(definition, &config.agents, &inputs, config.global.process)?;

    println!(
        "{} crew '{}' is valid: {} task(s), {} agent(s), {}",
        "OK".green().bold(),
        crew.name(),
        crew.tasks().len(),
        crew.agents().len(),
        crew.process()
    );
    describe(&crew);
    Ok(())
}

pub async fn run(root: &Path, args: RunArgs) -> Result<()> {
    let config = load(root).await?;
    let definition = find_crew(&config, &args.crew)?;

    let inputs = run_inputs(&args.question, args.data.as_deref())?;
    let mut crew = build_crew(definition, &config.agents, &inputs, config.global.process)?;
    if args.concurrent {
        crew = crew.with_process(Process::Concurrent);
    }
    tracing::debug!(
        crew = %crew.name(),
        process = %crew.process(),
        inputs = inputs.len(),
        "Crew built"
    );

    let runtime = RuntimeFactory::create(&config.global, root, args.dry_run)?;
    if !runtime.check_availability().await {
        bail!("The configured reasoning runtime is not available (use --dry-run to run without one)");
    }

    let (events_tx, events_rx) = mpsc::channel(config.global.event_buffer);
    let renderer = tokio::spawn(console::render_events(events_rx));

    let result = CrewEngine::new(runtime).kickoff(&crew, events_tx).await;
    renderer.await.context("Event renderer stopped unexpectedly")?;

    match result {
        Ok(output) => {
            console::print_summary(&output);
            Ok(())
        }
        Err(CrewError::TaskExecution(failure)) => {
            console::print_failure(&failure);
            Err(anyhow!("Crew '{}' failed at task '{}'", crew.name(), failure.task_name))
        }
        Err(error) => Err(error.into()),
    }
}
