//! Entities

pub mod admin;
pub mod admin_session;
pub mod timestamps;
pub mod user;
pub mod user_session;
