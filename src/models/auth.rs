//! Auth code DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to issue (or look up) the auth code of a GitHub login.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuthCodeRequest {
    pub login: String,
}

/// Auth code issued to a login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthCodeResponse {
    pub login: String,
    pub code: String,
}
