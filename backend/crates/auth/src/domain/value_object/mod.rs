//! Value Object Module

pub mod email_address;
pub mod session_token;
