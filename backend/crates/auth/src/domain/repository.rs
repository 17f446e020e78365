//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! "Not found" is `Ok(None)`; `Err` always means the store itself failed.
//! Transactions are explicit: [`TransactionScope::begin`] hands back a
//! repository bound to the transaction and callers pass it along.

use std::future::Future;

use kernel::id::{AdminId, UserId};

use crate::domain::entity::{
    admin::Admin, admin_session::AdminSession, user::User, user_session::UserSession,
};
use crate::domain::value_object::{email_address::EmailAddress, session_token::SessionToken};
use crate::error::AuthResult;

/// Admin repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    async fn find_by_id(&self, id: AdminId) -> AuthResult<Option<Admin>>;

    async fn find_by_email_address(&self, email_address: &EmailAddress)
    -> AuthResult<Option<Admin>>;

    async fn exists_by_email_address(&self, email_address: &EmailAddress) -> AuthResult<bool>;

    async fn create(&self, admin: &Admin) -> AuthResult<()>;

    /// Persist changes; refreshes `updated_at` first
    async fn update(&self, admin: &mut Admin) -> AuthResult<()>;
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_email_address(&self, email_address: &EmailAddress)
    -> AuthResult<Option<User>>;

    async fn exists_by_email_address(&self, email_address: &EmailAddress) -> AuthResult<bool>;

    /// Fails with `AuthError::Conflict` when the email address is taken
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Persist changes; refreshes `updated_at` first
    async fn update(&self, user: &mut User) -> AuthResult<()>;
}

/// Admin session repository trait
#[trait_variant::make(AdminSessionRepository: Send)]
pub trait LocalAdminSessionRepository {
    async fn find_by_token(&self, token: &SessionToken) -> AuthResult<Option<AdminSession>>;

    async fn create(&self, session: &AdminSession) -> AuthResult<()>;

    /// Returns whether a session was removed
    async fn delete_by_token(&self, token: &SessionToken) -> AuthResult<bool>;
}

/// User session repository trait
#[trait_variant::make(UserSessionRepository: Send)]
pub trait LocalUserSessionRepository {
    async fn find_by_token(&self, token: &SessionToken) -> AuthResult<Option<UserSession>>;

    async fn create(&self, session: &UserSession) -> AuthResult<()>;

    /// Returns whether a session was removed
    async fn delete_by_token(&self, token: &SessionToken) -> AuthResult<bool>;
}

/// Repository factory for transactional work
///
/// `Tx` implements every repository trait against one open transaction.
/// A `Tx` that is neither committed nor rolled back is rolled back when
/// its last clone is dropped.
pub trait TransactionScope: Send + Sync {
    type Tx: AdminRepository
        + UserRepository
        + AdminSessionRepository
        + UserSessionRepository
        + Clone
        + Send
        + Sync
        + 'static;

    fn begin(&self) -> impl Future<Output = AuthResult<Self::Tx>> + Send;

    fn commit(&self, tx: Self::Tx) -> impl Future<Output = AuthResult<()>> + Send;

    fn rollback(&self, tx: Self::Tx) -> impl Future<Output = AuthResult<()>> + Send;
}

/// Everything the auth routers need from a store
pub trait AuthStore:
    AdminRepository
    + UserRepository
    + AdminSessionRepository
    + UserSessionRepository
    + TransactionScope
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: AdminRepository
        + UserRepository
        + AdminSessionRepository
        + UserSessionRepository
        + TransactionScope
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Run `work` in a transaction
///
/// Commits on `Ok`, rolls back on `Err`. A failed rollback is logged and
/// the error from `work` is returned.
pub async fn run_in_transaction<S, F, Fut, T>(scope: &S, work: F) -> AuthResult<T>
where
    S: TransactionScope,
    F: FnOnce(S::Tx) -> Fut,
    Fut: Future<Output = AuthResult<T>>,
{
    let tx = scope.begin().await?;

    match work(tx.clone()).await {
        Ok(value) => {
            scope.commit(tx).await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = scope.rollback(tx).await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
