//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    admin::Admin, admin_session::AdminSession, timestamps::Timestamps, user::User,
    user_session::UserSession,
};
pub use repository::{
    AdminRepository, AdminSessionRepository, AuthStore, TransactionScope, UserRepository,
    UserSessionRepository, run_in_transaction,
};
