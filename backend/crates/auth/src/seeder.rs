//! Default data for a fresh database

use platform::config::SeedConfig;
use platform::password::ClearTextPassword;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::{AdminRepository, TransactionScope, run_in_transaction};
use crate::domain::value_object::email_address::EmailAddress;
use crate::error::{AuthError, AuthResult};

/// Insert the configured admin unless one with that address exists
///
/// Returns whether an admin was created. Safe to run repeatedly.
pub async fn seed_default_admin<S>(
    scope: &S,
    seed: &SeedConfig,
    pepper: Option<&[u8]>,
) -> AuthResult<bool>
where
    S: TransactionScope,
{
    let email_address = EmailAddress::new(&seed.admin_email_address)
        .map_err(|e| AuthError::field("emailAddress", e.to_string()))?;
    let password = ClearTextPassword::new(seed.admin_password.clone())
        .map_err(|e| AuthError::field("password", e.to_string()))?;
    let digest = password.hash(pepper)?;
    drop(password);

    let admin = Admin::new(seed.admin_name.clone(), email_address, digest);

    let created = run_in_transaction(scope, |tx| async move {
        if AdminRepository::exists_by_email_address(&tx, &admin.email_address).await? {
            return Ok(false);
        }
        AdminRepository::create(&tx, &admin).await?;
        Ok(true)
    })
    .await?;

    if created {
        tracing::info!(email_address = %seed.admin_email_address, "Seeded default admin");
    } else {
        tracing::info!(email_address = %seed.admin_email_address, "Default admin already present");
    }

    Ok(created)
}
