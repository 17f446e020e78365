//! Worker Entry Point
//!
//! `worker start` runs the background process. No jobs are registered yet;
//! the process idles until it is asked to stop.

use clap::{Parser, Subcommand};
use platform::config::AppConfig;
use platform::shutdown::shutdown_signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "worker", about = "Manage the worker process")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the worker
    Start,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Start => start(AppConfig::from_env()?).await,
    }
}

async fn start(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(database = %config.database.name, "Worker started");

    shutdown_signal().await;

    tracing::info!("Worker stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_shape() {
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["worker", "start"]).unwrap();
        assert!(matches!(cli.command, Command::Start));
        assert!(Cli::try_parse_from(["worker"]).is_err());
    }
}
