mod cli;
mod command;
mod config;
mod executor;
mod repl;
mod storage;
mod tasks;
mod ui;

use anyhow::{Context, Result};
use clap::Parser as _;
use cli::{Cli, Commands};
use command::Parser;
use config::AppConfig;
use repl::{Outcome, Session, restore_tasks};
use std::io;
use std::process::ExitCode;
use storage::Storage;
use tokio::io::BufReader;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use ui::Ui;

const DEFAULT_LOG_FILTER: &str = "taskline=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::from(&cli);
    let _log_guard = init_logging(&config)?;

    let storage = Storage::new(&config.data_file, config.format);
    info!(data_file = %storage.path().display(), "starting taskline");

    let mut ui = Ui::new(io::stdout(), config.format, config.colored);
    let tasks = restore_tasks(&storage, &mut ui).await?;
    let mut session = Session::new(Parser::new(config.format), storage, tasks, ui);

    match cli.command {
        Some(Commands::Exec { line }) => {
            if session.run_line(&line.join(" ")).await? == Outcome::Failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Interactive) | None => {
            session.run(BufReader::new(tokio::io::stdin())).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to a daily rolling file so they never interleave with the prompt.
fn init_logging(config: &AppConfig) -> Result<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, "taskline.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(guard)
}
