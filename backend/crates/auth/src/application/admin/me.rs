//! Admin Me Use Case

use kernel::id::AdminId;

use crate::domain::entity::admin::Admin;
use crate::error::{AuthError, AuthResult};

/// Public view of the signed-in admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminMeOutput {
    pub id: AdminId,
    pub name: String,
    pub email_address: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AdminMeUseCase;

impl AdminMeUseCase {
    /// `current` is whatever the middleware attached to the request
    pub fn execute(&self, current: Option<&Admin>) -> AuthResult<AdminMeOutput> {
        let admin = current.ok_or(AuthError::Unauthorized)?;

        Ok(AdminMeOutput {
            id: admin.id,
            name: admin.name.clone(),
            email_address: admin.email_address.to_string(),
        })
    }
}
