//! Use case inputs
//!
//! Shape rules live on the structs (`validator` derive); rules that need
//! parsing or the store are applied by the use cases themselves.

use kernel::validation::{ValidationErrors, validate};
use platform::client::ClientInfo;
use platform::password::ClearTextPassword;
use validator::Validate;

use crate::domain::value_object::email_address::EmailAddress;

pub(crate) const EMAIL_ADDRESS_FIELD: &str = "emailAddress";
pub(crate) const PASSWORD_FIELD: &str = "password";

/// Sign up input
#[derive(Debug, Clone, Validate)]
pub struct SignUpInput {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "email address is required"))]
    pub email_address: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub client: ClientInfo,
}

/// Sign in input (admin and user alike)
#[derive(Debug, Clone, Validate)]
pub struct SignInInput {
    #[validate(length(min = 1, message = "email address is required"))]
    pub email_address: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub client: ClientInfo,
}

impl SignUpInput {
    /// Every field rule, merged into one map
    ///
    /// Returns the parsed email address and password when no rule failed.
    pub(crate) fn check(
        &self,
    ) -> Result<(EmailAddress, ClearTextPassword), ValidationErrors> {
        let mut errors = validate(self);

        let email_address = match EmailAddress::new(&self.email_address) {
            Ok(email) => Some(email),
            Err(e) => {
                if errors.get(EMAIL_ADDRESS_FIELD).is_none() {
                    errors.add_error(EMAIL_ADDRESS_FIELD, &e);
                }
                None
            }
        };

        let password = match ClearTextPassword::new(self.password.clone()) {
            Ok(password) => Some(password),
            Err(e) => {
                if errors.get(PASSWORD_FIELD).is_none() {
                    errors.add_error(PASSWORD_FIELD, &e);
                }
                None
            }
        };

        match (email_address, password) {
            (Some(email), Some(password)) if !errors.is_fail() => Ok((email, password)),
            _ => Err(errors),
        }
    }
}
