//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use extract::{ApiJson, ClientContext, CurrentAdmin, CurrentUser};
pub use middleware::{authenticate_admin, authenticate_user};
pub use router::{admin_router, app_router, landing_router};
pub use state::AuthState;
