//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::admin::AdminMeOutput;
use crate::application::app::UserMeOutput;

// ============================================================================
// Requests
// ============================================================================

/// Sign up request
///
/// Missing fields deserialize as empty strings so they surface as field
/// validation errors rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub name: String,
    pub email_address: String,
    pub password: String,
}

/// Sign in request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    pub email_address: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Principal as exposed to clients; no credential material
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub id: String,
    pub name: String,
    pub email_address: String,
}

/// `GET /api/v1/admin/auth/me`
#[derive(Debug, Clone, Serialize)]
pub struct AdminMeResponse {
    pub admin: PrincipalResponse,
}

/// `GET /api/v1/app/auth/me`
#[derive(Debug, Clone, Serialize)]
pub struct UserMeResponse {
    pub user: PrincipalResponse,
}

impl From<AdminMeOutput> for AdminMeResponse {
    fn from(output: AdminMeOutput) -> Self {
        Self {
            admin: PrincipalResponse {
                id: output.id.to_string(),
                name: output.name,
                email_address: output.email_address,
            },
        }
    }
}

impl From<UserMeOutput> for UserMeResponse {
    fn from(output: UserMeOutput) -> Self {
        Self {
            user: PrincipalResponse {
                id: output.id.to_string(),
                name: output.name,
                email_address: output.email_address,
            },
        }
    }
}
