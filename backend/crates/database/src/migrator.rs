//! Embedded reversible migrations
//!
//! Files live in `database/migrations` at the repository root as
//! `<version>_<name>.up.sql` / `<version>_<name>.down.sql` pairs.

use sqlx::PgPool;
use sqlx::migrate::Migrator;

use crate::error::DbResult;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations");

/// One row of `db status` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Versions recorded as successfully applied, ascending
async fn applied_versions(pool: &PgPool) -> DbResult<Vec<i64>> {
    let has_table: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !has_table {
        return Ok(Vec::new());
    }

    let versions =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(pool)
            .await?;
    Ok(versions)
}

/// `(latest, target)` for undoing the latest applied migration
fn rollback_target(applied: &[i64]) -> Option<(i64, i64)> {
    let (&latest, rest) = applied.split_last()?;
    Some((latest, rest.last().copied().unwrap_or(0)))
}

/// Apply every pending migration; returns the versions applied
pub async fn migrate(pool: &PgPool) -> DbResult<Vec<i64>> {
    let before = applied_versions(pool).await?;
    MIGRATOR.run(pool).await?;
    let after = applied_versions(pool).await?;

    let applied: Vec<i64> = after
        .into_iter()
        .filter(|version| !before.contains(version))
        .collect();

    for migration in MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration() && applied.contains(&m.version))
    {
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            "Applied migration"
        );
    }
    if applied.is_empty() {
        tracing::info!("Database schema is up to date");
    }

    Ok(applied)
}

/// Undo the most recently applied migration; `None` when nothing is applied
pub async fn rollback(pool: &PgPool) -> DbResult<Option<i64>> {
    let Some((latest, target)) = rollback_target(&applied_versions(pool).await?) else {
        tracing::info!("No migrations to roll back");
        return Ok(None);
    };

    MIGRATOR.undo(pool, target).await?;
    tracing::info!(version = latest, "Rolled back migration");
    Ok(Some(latest))
}

/// Known migrations with their applied state
pub async fn status(pool: &PgPool) -> DbResult<Vec<MigrationStatus>> {
    let applied = applied_versions(pool).await?;

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
