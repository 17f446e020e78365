//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::config::AppConfig;
use platform::cookie::CookieConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the admin session token
    pub admin_cookie_name: String,
    /// Cookie carrying the user session token
    pub user_cookie_name: String,
    /// Full request paths the admin middleware lets through
    pub admin_bypass_paths: Vec<String>,
    /// Full request paths the user middleware lets through
    pub user_bypass_paths: Vec<String>,
    /// Whether to mark session cookies `Secure`
    pub cookie_secure: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_cookie_name: "admin_session".to_string(),
            user_cookie_name: "user_session".to_string(),
            admin_bypass_paths: vec!["/api/v1/admin/auth/signin".to_string()],
            user_bypass_paths: vec![
                "/api/v1/app/auth/signup".to_string(),
                "/api/v1/app/auth/signin".to_string(),
            ],
            cookie_secure: false,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            cookie_secure: config.cookie_secure,
            password_pepper: config
                .password_pepper
                .as_ref()
                .map(|pepper| pepper.as_bytes().to_vec()),
            ..Self::default()
        }
    }

    pub fn admin_cookie(&self) -> CookieConfig {
        CookieConfig::session(&self.admin_cookie_name, self.cookie_secure)
    }

    pub fn user_cookie(&self) -> CookieConfig {
        CookieConfig::session(&self.user_cookie_name, self.cookie_secure)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
