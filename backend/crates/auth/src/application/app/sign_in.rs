//! User Sign In Use Case
//!
//! Authenticates a user and creates a session. Existing sessions of the
//! same user stay valid.

use std::sync::Arc;

use kernel::validation::validate;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::input::SignInInput;
use crate::domain::entity::user_session::UserSession;
use crate::domain::repository::{UserRepository, UserSessionRepository};
use crate::domain::value_object::{email_address::EmailAddress, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

/// User sign in output
#[derive(Debug)]
pub struct UserSignInOutput {
    /// Session token for cookie
    pub session_token: SessionToken,
}

/// User sign in use case
pub struct UserSignInUseCase<U, S>
where
    U: UserRepository,
    S: UserSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> UserSignInUseCase<U, S>
where
    U: UserRepository,
    S: UserSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<UserSignInOutput> {
        let errors = validate(&input);
        if errors.is_fail() {
            return Err(AuthError::Validation(errors));
        }

        let email_address =
            EmailAddress::new(&input.email_address).map_err(|_| AuthError::InvalidCredentials)?;

        // Unknown address and wrong password must be indistinguishable
        let user = self
            .user_repo
            .find_by_email_address(&email_address)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = UserSession::new(user.id, &input.client);
        self.session_repo.create(&session).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(UserSignInOutput {
            session_token: session.token,
        })
    }
}
