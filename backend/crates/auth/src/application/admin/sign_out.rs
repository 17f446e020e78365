//! Admin Sign Out Use Case
//!
//! Invalidates an admin session.

use std::sync::Arc;

use crate::domain::repository::AdminSessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// Admin sign out use case
pub struct AdminSignOutUseCase<S>
where
    S: AdminSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> AdminSignOutUseCase<S>
where
    S: AdminSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Delete the session; an unknown token is a no-op
    pub async fn execute(&self, token: &SessionToken) -> AuthResult<()> {
        if self.session_repo.delete_by_token(token).await? {
            tracing::info!("Admin signed out");
        } else {
            tracing::debug!("Admin sign-out for unknown session");
        }
        Ok(())
    }
}
