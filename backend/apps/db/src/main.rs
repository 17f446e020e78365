//! Database lifecycle CLI
//!
//! `db migrate|rollback|create|drop|seed|setup|reset|status`

use auth::{AuthConfig, PgRepository, seed_default_admin};
use clap::{Parser, Subcommand};
use database::{Database, manager, migrator};
use platform::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "db", about = "Manage the database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Apply all pending migrations
    Migrate,
    /// Revert the last applied migration
    Rollback,
    /// Create the database
    Create,
    /// Drop the database
    Drop,
    /// Seed the database with initial data
    Seed,
    /// Create, migrate and seed
    Setup,
    /// Drop, create, migrate and seed
    Reset,
    /// List migrations and whether they are applied
    Status,
}

/// Primitive steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Create,
    Drop,
    Migrate,
    Rollback,
    Seed,
    Status,
}

impl Command {
    fn steps(self) -> &'static [Step] {
        match self {
            Command::Migrate => &[Step::Migrate],
            Command::Rollback => &[Step::Rollback],
            Command::Create => &[Step::Create],
            Command::Drop => &[Step::Drop],
            Command::Seed => &[Step::Seed],
            Command::Setup => &[Step::Create, Step::Migrate, Step::Seed],
            Command::Reset => &[Step::Drop, Step::Create, Step::Migrate, Step::Seed],
            Command::Status => &[Step::Status],
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "db=info,auth=info,database=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    for step in cli.command.steps() {
        run(*step, &config).await?;
    }
    Ok(())
}

async fn run(step: Step, config: &AppConfig) -> anyhow::Result<()> {
    match step {
        Step::Create => {
            manager::create_database(&config.database).await?;
        }
        Step::Drop => {
            manager::drop_database(&config.database).await?;
        }
        Step::Migrate => {
            let db = Database::connect(&config.database).await?;
            let applied = migrator::migrate(db.pool()).await?;
            if applied.is_empty() {
                tracing::info!("No pending migrations");
            }
            db.close().await;
        }
        Step::Rollback => {
            let db = Database::connect(&config.database).await?;
            if migrator::rollback(db.pool()).await?.is_none() {
                tracing::info!("Nothing to roll back");
            }
            db.close().await;
        }
        Step::Seed => {
            let db = Database::connect(&config.database).await?;
            let repo = PgRepository::new(db.handle());
            let auth_config = AuthConfig::from_app_config(config);
            seed_default_admin(&repo, &config.seed, auth_config.pepper()).await?;
            db.close().await;
        }
        Step::Status => {
            let db = Database::connect(&config.database).await?;
            for migration in migrator::status(db.pool()).await? {
                println!(
                    "{:>8}  {}  {}",
                    if migration.applied { "up" } else { "down" },
                    migration.version,
                    migration.description
                );
            }
            db.close().await;
        }
    }
    Ok(())
}
