//! Admin Sign In Use Case
//!
//! Authenticates an admin and creates a session.

use std::sync::Arc;

use kernel::validation::validate;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::input::SignInInput;
use crate::domain::entity::admin_session::AdminSession;
use crate::domain::repository::{AdminRepository, AdminSessionRepository};
use crate::domain::value_object::{email_address::EmailAddress, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

/// Admin sign in output
#[derive(Debug)]
pub struct AdminSignInOutput {
    /// Session token for cookie
    pub session_token: SessionToken,
}

/// Admin sign in use case
pub struct AdminSignInUseCase<A, S>
where
    A: AdminRepository,
    S: AdminSessionRepository,
{
    admin_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> AdminSignInUseCase<A, S>
where
    A: AdminRepository,
    S: AdminSessionRepository,
{
    pub fn new(admin_repo: Arc<A>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            admin_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<AdminSignInOutput> {
        let errors = validate(&input);
        if errors.is_fail() {
            return Err(AuthError::Validation(errors));
        }

        // A malformed address cannot belong to anyone
        let email_address =
            EmailAddress::new(&input.email_address).map_err(|_| AuthError::InvalidCredentials)?;

        let admin = self
            .admin_repo
            .find_by_email_address(&email_address)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !admin.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AdminSession::new(admin.id, &input.client);
        self.session_repo.create(&session).await?;

        tracing::info!(admin_id = %admin.id, "Admin signed in");

        Ok(AdminSignInOutput {
            session_token: session.token,
        })
    }
}
