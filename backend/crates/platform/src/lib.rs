//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment-driven configuration
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Client identification (IP address, User-Agent)
//! - Opaque token generation
//! - Process shutdown signal

pub mod client;
pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod shutdown;
