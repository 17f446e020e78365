//! Scaffolding generator
//!
//! `generate migration|usecase|repository|entity <name>`

mod generator;
mod naming;
mod templates;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::generator::Generator;

#[derive(Parser)]
#[command(name = "generate", about = "Generate project components")]
struct Cli {
    /// Crate that receives usecases, repositories and entities
    #[arg(long, global = true, default_value = "backend/crates/auth")]
    crate_dir: PathBuf,

    /// Directory holding the SQL migrations
    #[arg(long, global = true, default_value = "database/migrations")]
    migrations_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a new database migration
    Migration { name: String },
    /// Generate a new usecase
    Usecase { name: String },
    /// Generate a new repository
    Repository { name: String },
    /// Generate a new entity
    Entity { name: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "generate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let generator = Generator::new(cli.crate_dir, cli.migrations_dir)?;

    let created = match cli.command {
        Command::Migration { name } => generator.migration(&name, chrono::Utc::now())?,
        Command::Usecase { name } => vec![generator.usecase(&name)?],
        Command::Repository { name } => vec![generator.repository(&name)?],
        Command::Entity { name } => vec![generator.entity(&name)?],
    };

    for path in created {
        println!("{}", path.display());
    }
    Ok(())
}
