//! User Me Use Case

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Public view of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMeOutput {
    pub id: UserId,
    pub name: String,
    pub email_address: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UserMeUseCase;

impl UserMeUseCase {
    pub fn execute(&self, current: Option<&User>) -> AuthResult<UserMeOutput> {
        let user = current.ok_or(AuthError::Unauthorized)?;

        Ok(UserMeOutput {
            id: user.id,
            name: user.name.clone(),
            email_address: user.email_address.to_string(),
        })
    }
}
