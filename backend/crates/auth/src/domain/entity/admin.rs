//! Admin Entity
//!
//! Back-office principal. Admins are provisioned by the seeder, never
//! through a public sign-up.

use kernel::id::AdminId;
use platform::password::HashedPassword;

use crate::domain::entity::timestamps::Timestamps;
use crate::domain::value_object::email_address::EmailAddress;

#[derive(Debug, Clone)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub email_address: EmailAddress,
    /// Argon2id digest; never leaves the backend
    pub password: HashedPassword,
    pub timestamps: Timestamps,
}

impl Admin {
    pub fn new(name: impl Into<String>, email_address: EmailAddress, password: HashedPassword) -> Self {
        Self {
            id: AdminId::new(),
            name: name.into(),
            email_address,
            password,
            timestamps: Timestamps::now(),
        }
    }
}
