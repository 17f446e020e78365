//! User session check

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserRepository, UserSessionRepository};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUserUseCase<U, S>
where
    U: UserRepository,
    S: UserSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
}

impl<U, S> AuthenticateUserUseCase<U, S>
where
    U: UserRepository,
    S: UserSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    pub async fn execute(&self, token: Option<SessionToken>) -> AuthResult<User> {
        let token = token.ok_or(AuthError::Unauthorized)?;

        let session = self
            .session_repo
            .find_by_token(&token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        self.user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
