//! Sign Up Use Case
//!
//! Registers a user and opens their first session in one transaction.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::input::{EMAIL_ADDRESS_FIELD, SignUpInput};
use crate::domain::entity::{user::User, user_session::UserSession};
use crate::domain::repository::{
    TransactionScope, UserRepository, UserSessionRepository, run_in_transaction,
};
use crate::domain::value_object::{email_address::EmailAddress, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

pub(crate) const EMAIL_ADDRESS_TAKEN: &str = "email address already registered";

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    /// Session token for cookie
    pub session_token: SessionToken,
}

/// Sign up use case
pub struct SignUpUseCase<U, T>
where
    U: UserRepository,
    T: TransactionScope,
{
    user_repo: Arc<U>,
    scope: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> SignUpUseCase<U, T>
where
    U: UserRepository,
    T: TransactionScope,
{
    pub fn new(user_repo: Arc<U>, scope: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            scope,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let (email_address, password) = match input.check() {
            Ok(parsed) => parsed,
            Err(mut errors) => {
                // Report a taken address alongside the other field errors
                if errors.get(EMAIL_ADDRESS_FIELD).is_none() {
                    if let Ok(email) = input.email_address.parse::<EmailAddress>() {
                        if self.user_repo.exists_by_email_address(&email).await? {
                            errors.add(EMAIL_ADDRESS_FIELD, EMAIL_ADDRESS_TAKEN);
                        }
                    }
                }
                return Err(AuthError::Validation(errors));
            }
        };

        if self.user_repo.exists_by_email_address(&email_address).await? {
            return Err(AuthError::field(EMAIL_ADDRESS_FIELD, EMAIL_ADDRESS_TAKEN));
        }

        let digest = password.hash(self.config.pepper())?;
        drop(password);

        let user = User::new(input.name, email_address, digest);
        let client = input.client;

        let (user_id, session) = run_in_transaction(self.scope.as_ref(), |tx| async move {
            UserRepository::create(&tx, &user).await?;

            let session = UserSession::new(user.id, &client);
            UserSessionRepository::create(&tx, &session).await?;

            Ok((user.id, session))
        })
        .await
        .map_err(|err| match err {
            // Lost a race with a concurrent sign-up for the same address
            AuthError::Conflict(_) => AuthError::field(EMAIL_ADDRESS_FIELD, EMAIL_ADDRESS_TAKEN),
            other => other,
        })?;

        tracing::info!(user_id = %user_id, "User signed up");

        Ok(SignUpOutput {
            user_id,
            session_token: session.token,
        })
    }
}
