//! User Sign Out Use Case

use std::sync::Arc;

use crate::domain::repository::UserSessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;

/// User sign out use case
pub struct UserSignOutUseCase<S>
where
    S: UserSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> UserSignOutUseCase<S>
where
    S: UserSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Delete the session; an unknown token is a no-op
    pub async fn execute(&self, token: &SessionToken) -> AuthResult<()> {
        if self.session_repo.delete_by_token(token).await? {
            tracing::info!("User signed out");
        } else {
            tracing::debug!("User sign-out for unknown session");
        }
        Ok(())
    }
}
