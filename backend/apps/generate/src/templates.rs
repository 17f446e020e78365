//! Scaffolding templates
//!
//! Rendered with `minijinja`; every template sees `snake`, `pascal` and `title`.

pub const MIGRATION_UP: &str = "-- {{ title }}\n";

pub const MIGRATION_DOWN: &str = "-- Revert {{ title }}\n";

pub const USECASE: &str = r#"//! {{ title }} Use Case

use std::sync::Arc;

use crate::error::AuthResult;

/// {{ title }} input
#[derive(Debug, Clone)]
pub struct {{ pascal }}Input {}

/// {{ title }} output
#[derive(Debug, Clone)]
pub struct {{ pascal }}Output {}

/// {{ title }} use case
pub struct {{ pascal }}UseCase<R> {
    repo: Arc<R>,
}

impl<R> {{ pascal }}UseCase<R>
where
    R: Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: {{ pascal }}Input) -> AuthResult<{{ pascal }}Output> {
        let _ = (&self.repo, input);
        Ok({{ pascal }}Output {})
    }
}
"#;

pub const REPOSITORY: &str = r#"//! {{ title }} Repository

use database::SqlHandle;

/// {{ title }} repository trait
#[trait_variant::make({{ pascal }}Repository: Send)]
pub trait Local{{ pascal }}Repository {}

/// PostgreSQL-backed {{ title | lower }} repository
#[derive(Debug, Clone)]
pub struct Pg{{ pascal }}Repository {
    sql: SqlHandle,
}

impl Pg{{ pascal }}Repository {
    pub fn new(sql: SqlHandle) -> Self {
        Self { sql }
    }

    pub fn sql(&self) -> &SqlHandle {
        &self.sql
    }
}

impl {{ pascal }}Repository for Pg{{ pascal }}Repository {}
"#;

pub const ENTITY: &str = r#"//! {{ title }} Entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// {{ title }} entity
#[derive(Debug, Clone)]
pub struct {{ pascal }} {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl {{ pascal }} {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Pre-update hook
    pub fn before_update(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for {{ pascal }} {
    fn default() -> Self {
        Self::new()
    }
}
"#;
