//! Shared handler state

use std::sync::Arc;

use crate::application::config::AuthConfig;

/// Repository and configuration shared by auth handlers and middleware
pub struct AuthState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthState<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

impl<R> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}
