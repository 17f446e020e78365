//! Admin Session Entity
//!
//! Server-side record behind the `admin_session` cookie. Sessions have no
//! expiry; they end when the admin signs out.

use kernel::id::{AdminId, AdminSessionId};
use platform::client::ClientInfo;

use crate::domain::entity::timestamps::Timestamps;
use crate::domain::value_object::session_token::SessionToken;

#[derive(Debug, Clone)]
pub struct AdminSession {
    pub id: AdminSessionId,
    pub admin_id: AdminId,
    pub token: SessionToken,
    pub ip_address: String,
    pub user_agent: String,
    pub timestamps: Timestamps,
}

impl AdminSession {
    /// New session with a freshly generated token
    pub fn new(admin_id: AdminId, client: &ClientInfo) -> Self {
        Self {
            id: AdminSessionId::new(),
            admin_id,
            token: SessionToken::generate(),
            ip_address: client.ip_string(),
            user_agent: client.user_agent.clone(),
            timestamps: Timestamps::now(),
        }
    }
}
