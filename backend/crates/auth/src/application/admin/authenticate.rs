//! Admin session check
//!
//! Resolves the admin behind a cookie token. Used by the admin middleware.

use std::sync::Arc;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::{AdminRepository, AdminSessionRepository};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateAdminUseCase<A, S>
where
    A: AdminRepository,
    S: AdminSessionRepository,
{
    admin_repo: Arc<A>,
    session_repo: Arc<S>,
}

impl<A, S> AuthenticateAdminUseCase<A, S>
where
    A: AdminRepository,
    S: AdminSessionRepository,
{
    pub fn new(admin_repo: Arc<A>, session_repo: Arc<S>) -> Self {
        Self {
            admin_repo,
            session_repo,
        }
    }

    /// Missing token, unknown session and missing admin are all `Unauthorized`
    pub async fn execute(&self, token: Option<SessionToken>) -> AuthResult<Admin> {
        let token = token.ok_or(AuthError::Unauthorized)?;

        let session = self
            .session_repo
            .find_by_token(&token)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        self.admin_repo
            .find_by_id(session.admin_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
