//! User Session Entity
//!
//! Server-side record behind the `user_session` cookie.

use kernel::id::{UserId, UserSessionId};
use platform::client::ClientInfo;

use crate::domain::entity::timestamps::Timestamps;
use crate::domain::value_object::session_token::SessionToken;

/// User session entity
#[derive(Debug, Clone)]
pub struct UserSession {
    pub id: UserSessionId,
    pub user_id: UserId,
    /// Opaque bearer token stored in the cookie
    pub token: SessionToken,
    pub ip_address: String,
    pub user_agent: String,
    pub timestamps: Timestamps,
}

impl UserSession {
    /// New session with a freshly generated token
    ///
    /// Several sessions per user may be live at once.
    pub fn new(user_id: UserId, client: &ClientInfo) -> Self {
        Self {
            id: UserSessionId::new(),
            user_id,
            token: SessionToken::generate(),
            ip_address: client.ip_string(),
            user_agent: client.user_agent.clone(),
            timestamps: Timestamps::now(),
        }
    }
}
