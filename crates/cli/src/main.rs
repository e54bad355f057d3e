//! `crew`: run crews of agents from a `.crew-kit/` project.

mod commands;
mod console;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crew", version)]
#[command(about = "Run crews of agents over dependent tasks", long_about = None)]
struct Cli {
    /// Project root containing `.crew-kit/`
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create `.crew-kit/` with the default agents and crews
    Init {
        /// Overwrite an existing `.crew-kit/` directory
        #[arg(long)]
        force: bool,

        /// Only the problem-definition agent and its crew
        #[arg(long)]
        minimal: bool,
    },

    /// List configured agents and crews
    List,

    /// Check that a crew can be built from its definition
    Validate {
        /// Crew name
        crew: String,
    },

    /// Run a crew
    Run(commands::RunArgs),
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "ck_core=debug,ck_cli=debug"
    } else {
        "ck_core=info,ck_cli=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // stdout is reserved for the crew transcript
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { force, minimal } => commands::init(&cli.root, force, minimal).await,
        Commands::List => commands::list(&cli.root).await,
        Commands::Validate { crew } => commands::validate(&cli.root, &crew).await,
        Commands::Run(args) => commands::run(&cli.root, args).await,
    };

    result.map_err(|e| color_eyre::eyre::eyre!(e))
}
