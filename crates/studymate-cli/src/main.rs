use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use studymate_application::StudyMateApp;
use studymate_core::backend::StudyBackend;
use studymate_core::config::ClientConfig;
use studymate_core::storage::ClientStorage;
use studymate_infrastructure::{
    ConfigService, FileClientStorage, MemoryClientStorage, StudyMatePaths,
};
use studymate_interaction::HttpStudyBackend;

mod command;
mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "studymate")]
#[command(about = "StudyMate - study plans, Q&A and quizzes from your documents", long_about = None)]
struct Cli {
    /// Directory holding config, storage and logs (defaults to the platform config dir)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Config file to use instead of <config dir>/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Client storage file to use instead of <config dir>/storage.toml
    #[arg(long, value_name = "PATH", conflicts_with = "ephemeral")]
    storage: Option<PathBuf>,

    /// Keep the session and preferences in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Log filter, e.g. "debug" or "studymate_application=trace"
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive client (default)
    Repl,
    /// Check that the service is reachable
    Health,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = StudyMatePaths::new(cli.config_dir.clone());

    let config_service = match &cli.config {
        Some(path) => ConfigService::new(path.clone()),
        None => ConfigService::from_paths(&paths)?,
    };
    let mut config = config_service
        .get_config()
        .context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    let _log_guard = logging::init_logging(&config.log_level, paths.logs_dir().ok().as_deref());
    tracing::info!("[Main] StudyMate starting against {}", config.api_base_url);

    let backend: Arc<dyn StudyBackend> = Arc::new(HttpStudyBackend::from_config(&config)?);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Health => health(backend.as_ref(), &config).await,
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Repl => {
            let storage = open_storage(&cli.storage, cli.ephemeral, &paths)?;
            let app = Arc::new(StudyMateApp::new(
                backend.clone(),
                storage,
                config.policy.clone(),
            ));

            if let Some(session) = app.restore().await {
                println!(
                    "{}",
                    format!("Welcome back, {}", session.display_name()).bright_green()
                );
            }

            repl::Repl::new(
                app,
                backend,
                Duration::from_millis(config.notification_duration_ms),
            )
            .run()
            .await
        }
    }
}

fn open_storage(
    path: &Option<PathBuf>,
    ephemeral: bool,
    paths: &StudyMatePaths,
) -> Result<Arc<dyn ClientStorage>> {
    let storage: Arc<dyn ClientStorage> = if ephemeral {
        Arc::new(MemoryClientStorage::new())
    } else if let Some(path) = path {
        Arc::new(FileClientStorage::new(path.clone()))
    } else {
        Arc::new(FileClientStorage::from_paths(paths)?)
    };
    Ok(storage)
}

async fn health(backend: &dyn StudyBackend, config: &ClientConfig) -> Result<()> {
    match backend.health().await {
        Ok(()) => {
            println!("{}", format!("{} is up", config.api_base_url).bright_green());
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("{} is unreachable: {}", config.api_base_url, e).red());
            Err(e.into())
        }
    }
}
