use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interrupt::{INTERRUPTED_EXIT_CODE, Interrupted, Interrupts};
use owo_colors::OwoColorize;
use radar_core::{Config, Workspace, logging};
use session::Session;
use std::path::{Path, PathBuf};

mod interrupt;
mod output;
mod session;
mod slash;

/// Radar - company intelligence and policy briefs for sales teams
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(about = "Company reports and policy briefs in the terminal", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to radar.toml (default: ./radar.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use scripted answers instead of the configured provider
    #[arg(long)]
    mock: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write an example config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Analyse a company, then take follow-up questions and /commands from stdin
    Report {
        /// Full company name
        #[arg(required = true, value_name = "COMPANY")]
        company: String,

        /// Analysis dimension (repeatable, default: all)
        #[arg(short, long = "focus", value_name = "AREA")]
        focus: Vec<String>,
    },
    /// Interpret an industry policy, then take follow-up questions and /commands from stdin
    Brief {
        /// Policy title, clause or question
        #[arg(required = true, value_name = "QUERY")]
        query: String,

        /// Extra context for the interpretation
        #[arg(long, value_name = "TEXT")]
        context: Option<String>,
    },
    /// List available agents
    Agents,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        if e.downcast_ref::<Interrupted>().is_some() {
            eprintln!("{} Interrupted", "Warning:".yellow().bold());
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("radar.toml"));

    if let Commands::Init { force } = cli.command {
        return cmd_init(&config_path, force);
    }

    let config = load_config(&config_path, cli.mock)?;

    let mut log_config = logging::LoggingConfig::from(config.logging.clone());
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let _log_guard = logging::init_logging(Some(log_config)).context("Failed to initialise logging")?;

    let provider = if cli.mock { "mock" } else { config.provider.name() };
    tracing::info!(config = %config_path.display(), provider, "radar started");
    if cli.verbose {
        println!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
        println!("{} Provider: {}", "Info:".blue().bold(), provider.cyan());
    }

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Agents => cmd_agents(&config),
        Commands::Report { company, focus } => {
            let session = Session::new(&config, cli.mock, cli.verbose, listen()?)?;
            session.report(&company, &focus).await?;
            session.follow_ups(tokio::io::stdin()).await
        }
        Commands::Brief { query, context } => {
            let session = Session::new(&config, cli.mock, cli.verbose, listen()?)?;
            session.brief(&query, context.as_deref()).await?;
            session.follow_ups(tokio::io::stdin()).await
        }
    }
}

/// Route Ctrl-C to the session for the rest of the process
fn listen() -> Result<Interrupts> {
    Interrupts::listen().context("Failed to install Ctrl-C handler")
}

/// Load config from file; without one only `--mock` can run
fn load_config(path: &Path, mock: bool) -> Result<Config> {
    if path.exists() {
        return Config::from_file(path).with_context(|| format!("Failed to load config from {}", path.display()));
    }
    if mock {
        return Ok(Config::default());
    }
    anyhow::bail!("Config not found at {}. Run `radar init` to create one, or pass --mock", path.display())
}

/// Write the example config
fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(path, Config::example()).context("Failed to create config")?;
    println!(
        "{} Created config at {}. Please edit it with your settings.",
        "Success:".green().bold(),
        path.display()
    );
    Ok(())
}

/// List the agent catalog
fn cmd_agents(config: &Config) -> Result<()> {
    let workspace = Workspace::new(config.user.clone().into());
    println!("{}", "Agents".green().bold().underline());
    for agent in workspace.agents() {
        let pin = if agent.pinned { " (pinned)" } else { "" };
        println!("  {} {}{}", agent.icon.glyph(), agent.name.bold(), pin.dimmed());
        println!("    {}", agent.description);
        println!("    {} {}", "category:".dimmed(), agent.category.label().cyan());
    }
    Ok(())
}
