//! Application Configuration
//!
//! Typed configuration read from the process environment. Binaries call
//! `dotenvy::dotenv()` first so a local `.env` file is honoured.
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_HOST` / `SERVER_PORT` | `0.0.0.0` / `8000` |
//! | `PUBLIC_DIR` | `public` |
//! | `FRONTEND_ORIGINS` | (none) |
//! | `DB_SQL_HOST` / `DB_SQL_PORT` | `localhost` / `5432` |
//! | `DB_SQL_USER` / `DB_SQL_PASSWORD` / `DB_SQL_NAME` | required |
//! | `DB_SQL_MAX_CONNECTIONS` | 4 × available cores |
//! | `STORAGE_S3_*` | optional block, enabled by `STORAGE_S3_BUCKET` |
//! | `SEED_ADMIN_NAME` / `_EMAIL_ADDRESS` / `_PASSWORD` | development values |
//! | `COOKIE_SECURE` | `false` |
//! | `PASSWORD_PEPPER` | (none) |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served at `/`
    pub public_dir: String,
    /// Allowed CORS origins (empty = same-origin only)
    pub frontend_origins: Vec<String>,
    /// Drain deadline for in-flight requests at shutdown
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// PostgreSQL connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// S3-compatible object storage
#[derive(Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub presign_expiry_secs: u32,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("presign_expiry_secs", &self.presign_expiry_secs)
            .finish()
    }
}

/// Default admin created by `db seed`
#[derive(Clone)]
pub struct SeedConfig {
    pub admin_name: String,
    pub admin_email_address: String,
    pub admin_password: String,
}

impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("admin_name", &self.admin_name)
            .field("admin_email_address", &self.admin_email_address)
            .finish()
    }
}

/// Whole-application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: Option<StorageConfig>,
    pub seed: SeedConfig,
    pub cookie_secure: bool,
    pub password_pepper: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let default_pool = std::thread::available_parallelism()
            .map(|n| n.get() as u32 * 4)
            .unwrap_or(8);

        let server = ServerConfig {
            host: env.or("SERVER_HOST", "0.0.0.0"),
            port: env.parse_or("SERVER_PORT", 8000)?,
            public_dir: env.or("PUBLIC_DIR", "public"),
            frontend_origins: env
                .get("FRONTEND_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            shutdown_timeout: Duration::from_secs(30),
        };

        let database = DatabaseConfig {
            host: env.or("DB_SQL_HOST", "localhost"),
            port: env.parse_or("DB_SQL_PORT", 5432)?,
            user: env.required("DB_SQL_USER")?,
            password: env.required("DB_SQL_PASSWORD")?,
            name: env.required("DB_SQL_NAME")?,
            max_connections: env.parse_or("DB_SQL_MAX_CONNECTIONS", default_pool)?,
            idle_timeout: Duration::from_secs(5 * 60),
            max_lifetime: Duration::from_secs(30 * 60),
        };

        let storage = match env.get("STORAGE_S3_BUCKET") {
            Some(bucket) => Some(StorageConfig {
                access_key_id: env.required("STORAGE_S3_ACCESS_KEY_ID")?,
                secret_access_key: env.required("STORAGE_S3_SECRET_ACCESS_KEY")?,
                endpoint: env.required("STORAGE_S3_ENDPOINT")?,
                bucket,
                region: env.or("STORAGE_S3_REGION", "auto"),
                presign_expiry_secs: env.parse_or("STORAGE_S3_PRESIGN_EXPIRY_SECS", 3600)?,
            }),
            None => None,
        };

        let seed = SeedConfig {
            admin_name: env.or("SEED_ADMIN_NAME", "Administrator"),
            admin_email_address: env.or("SEED_ADMIN_EMAIL_ADDRESS", "admin@example.com"),
            admin_password: env.or("SEED_ADMIN_PASSWORD", "change-me-on-first-login"),
        };

        Ok(Self {
            server,
            database,
            storage,
            seed,
            cookie_secure: env.parse_or("COOKIE_SECURE", false)?,
            password_pepper: env.get("PASSWORD_PEPPER"),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.is_empty())
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn parse_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DB_SQL_USER", "postgres"),
        ("DB_SQL_PASSWORD", "secret"),
        ("DB_SQL_NAME", "starter_development"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:8000");
        assert_eq!(config.server.public_dir, "public");
        assert_eq!(config.database.port, 5432);
        assert!(config.database.max_connections >= 4);
        assert!(config.storage.is_none());
        assert!(!config.cookie_secure);
        assert!(config.password_pepper.is_none());
    }

    #[test]
    fn test_missing_required() {
        let err = AppConfig::from_lookup(lookup(&[("DB_SQL_USER", "postgres")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_SQL_PASSWORD"));
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SERVER_PORT", "eighty"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SERVER_PORT", .. }));
    }

    #[test]
    fn test_storage_block() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("STORAGE_S3_BUCKET", "uploads"),
            ("STORAGE_S3_ACCESS_KEY_ID", "key"),
            ("STORAGE_S3_SECRET_ACCESS_KEY", "secret"),
            ("STORAGE_S3_ENDPOINT", "http://localhost:9000"),
        ]);
        let storage = AppConfig::from_lookup(lookup(&pairs)).unwrap().storage.unwrap();
        assert_eq!(storage.region, "auto");
        assert_eq!(storage.presign_expiry_secs, 3600);
    }

    #[test]
    fn test_frontend_origins_split() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("FRONTEND_ORIGINS", "http://a.test, http://b.test,"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.server.frontend_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("change-me-on-first-login"));
    }
}
