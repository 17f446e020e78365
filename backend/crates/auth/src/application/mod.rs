//! Application Layer
//!
//! Use cases, split by audience the same way the HTTP surface is:
//! `admin` for the back office, `app` for end users.

pub mod admin;
pub mod app;
pub mod config;
pub mod input;

// Re-exports
pub use config::AuthConfig;
pub use input::{SignInInput, SignUpInput};
