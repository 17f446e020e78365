//! Database lifecycle - create and drop the application database

use platform::config::DatabaseConfig;
use sqlx::{Connection, PgConnection};

use crate::error::DbResult;
use crate::pool::maintenance_options;

/// Quote an identifier for interpolation into DDL
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

async fn database_exists(conn: &mut PgConnection, name: &str) -> DbResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)",
    )
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(exists)
}

/// Create the configured database; returns `false` if it already existed
pub async fn create_database(config: &DatabaseConfig) -> DbResult<bool> {
    let mut conn = PgConnection::connect_with(&maintenance_options(config)).await?;

    let created = if database_exists(&mut conn, &config.name).await? {
        tracing::info!(database = %config.name, "Database already exists");
        false
    } else {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&config.name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %config.name, "Database created");
        true
    };

    conn.close().await?;
    Ok(created)
}

/// Drop the configured database; returns `false` if it did not exist
pub async fn drop_database(config: &DatabaseConfig) -> DbResult<bool> {
    let mut conn = PgConnection::connect_with(&maintenance_options(config)).await?;

    let dropped = if database_exists(&mut conn, &config.name).await? {
        sqlx::query(&format!("DROP DATABASE {}", quote_ident(&config.name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %config.name, "Database dropped");
        true
    } else {
        tracing::info!(database = %config.name, "Database does not exist");
        false
    };

    conn.close().await?;
    Ok(dropped)
}
