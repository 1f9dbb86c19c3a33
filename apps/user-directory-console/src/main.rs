mod config;
mod console;
mod logging;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use user_directory::UserDirectoryModule;
use user_directory::module::parse_base_url;

use crate::config::AppConfig;
use crate::console::{Console, LineConfirm, StdoutTableView};

/// User Directory - manage a remote user list from the terminal
#[derive(Parser)]
#[command(name = "user-directory")]
#[command(about = "User Directory - manage a remote user list from the terminal")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the remote users service (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the directory and start the interactive console
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (USER_DIRECTORY__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_base_url(cli.base_url.as_deref());

    logging::init(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    parse_base_url(&config.directory.base_url)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run(config: &AppConfig) -> Result<()> {
    let lines = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let module = UserDirectoryModule::build(
        &config.directory,
        Arc::new(StdoutTableView),
        Arc::new(LineConfirm::new(Arc::clone(&lines))),
    )?;
    tracing::info!(base_url = %module.base_url(), "User Directory starting");

    let controller = module.controller();
    if let Err(err) = controller.load().await {
        println!("! {}", err.notice());
    }

    Console::new(controller, lines).run().await
}
