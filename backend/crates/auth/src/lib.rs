//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, split into `admin` and `app` audiences
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Features
//! - Admin sign-in/sign-out/me (admins are seeded, never signed up)
//! - User sign-up/sign-in/sign-out/me
//! - Server-side sessions behind opaque, HttpOnly cookie tokens
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Unknown email and wrong password produce the same error
//! - Sessions end only on sign-out

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod seeder;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgRepository;
pub use presentation::router::{admin_router, app_router, landing_router};
pub use seeder::seed_default_admin;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
