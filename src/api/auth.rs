//! Auth code issuance.

use actix_web::{HttpResponse, web};

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{AuthCodeRequest, AuthCodeResponse};
use crate::services;

/// Issue (or look up) the auth code of a GitHub login.
#[utoipa::path(
    post,
    path = "/api/auth/code",
    tag = "Auth",
    request_body = AuthCodeRequest,
    responses(
        (status = 200, description = "Auth code of the login", body = AuthCodeResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn issue_auth_code(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    body: web::Json<AuthCodeRequest>,
) -> AppResult<HttpResponse> {
    let login = body.into_inner().login.trim().to_string();
    let code = services::get_auth_code(pool.get_ref(), &login).await?;

    Ok(HttpResponse::Ok().json(AuthCodeResponse { login, code }))
}

/// Configure auth routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/code").route(web::post().to(issue_auth_code)));
}
