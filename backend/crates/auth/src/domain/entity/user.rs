//! User Entity
//!
//! End-user principal created through sign-up.

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::entity::timestamps::Timestamps;
use crate::domain::value_object::email_address::EmailAddress;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across users
    pub email_address: EmailAddress,
    /// Argon2id digest; never leaves the backend
    pub password: HashedPassword,
    pub timestamps: Timestamps,
}

impl User {
    /// Create a new user
    pub fn new(name: impl Into<String>, email_address: EmailAddress, password: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email_address,
            password,
            timestamps: Timestamps::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    #[test]
    fn test_new_user_gets_fresh_id() {
        let password = ClearTextPassword::new("correct horse battery".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        let email = EmailAddress::new("jane@example.com").unwrap();

        let first = User::new("Jane", email.clone(), password.clone());
        let second = User::new("Jane", email, password);
        assert_ne!(first.id, second.id);
        assert_eq!(first.timestamps.created_at, first.timestamps.updated_at);
    }
}
