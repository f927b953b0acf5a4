//! Actix-web extractors for auth code and admin key authentication.
//!
//! Secret header values are wrapped in `SecretString` as soon as they are
//! read and are never logged.

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};
use tracing::error;

use super::AdminKey;
use crate::config::{ADMIN_KEY_HEADER, AUTH_CODE_SCHEME};
use crate::db::DbPool;
use crate::error::ErrorResponse;
use crate::services::auth_code;

/// Read a header value as a secret. `None` if missing or not valid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Auth code carried by an `Authorization: nayduck <code>` header value.
///
/// The scheme is matched case-insensitively.
pub fn parse_auth_code(value: &str) -> Option<&str> {
    let (scheme, code) = value.trim().split_once(' ')?;
    let code = code.trim();
    (scheme.eq_ignore_ascii_case(AUTH_CODE_SCHEME) && !code.is_empty()).then_some(code)
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    status: StatusCode,
    message: String,
}

impl AuthError {
    fn unauthorized(message: impl Into<String>) -> Self {
        AuthError {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        AuthError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let error = if self.status == StatusCode::UNAUTHORIZED {
            "UNAUTHORIZED"
        } else {
            "INTERNAL_ERROR"
        };
        HttpResponse::build(self.status).json(ErrorResponse {
            error: error.to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a valid auth code.
///
/// ```ignore
/// async fn protected_handler(auth: CodeAuth) -> impl Responder {
///     // auth.login is the GitHub login the code was issued to
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CodeAuth {
    pub login: String,
}

impl FromRequest for CodeAuth {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let code = extract_secret_header(req, header::AUTHORIZATION.as_str()).and_then(|value| {
            parse_auth_code(value.expose_secret()).map(|code| SecretString::from(code.to_string()))
        });

        Box::pin(async move {
            let Some(pool) = pool else {
                return Err(AuthError::internal("Internal configuration error"));
            };
            let Some(code) = code else {
                return Err(AuthError::unauthorized(format!(
                    "Missing auth code. Provide 'Authorization: {} <code>' header.",
                    AUTH_CODE_SCHEME
                )));
            };

            match auth_code::get_github_login(pool.get_ref(), code.expose_secret()).await {
                Ok(Some(login)) => Ok(CodeAuth { login }),
                Ok(None) => Err(AuthError::unauthorized("Invalid auth code")),
                Err(e) => {
                    error!("Failed to verify auth code: {}", e);
                    Err(AuthError::internal("Failed to verify auth code"))
                }
            }
        })
    }
}

/// Extractor that requires the bootstrap admin key in `X-Admin-Key`.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequest for AdminAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(stored) = req.app_data::<web::Data<AdminKey>>() else {
            return ready(Err(AuthError::unauthorized("Admin key is not configured")));
        };

        match extract_secret_header(req, ADMIN_KEY_HEADER) {
            Some(provided) if stored.verify(provided.expose_secret()) => ready(Ok(AdminAuth)),
            Some(_) => ready(Err(AuthError::unauthorized("Invalid admin key"))),
            None => ready(Err(AuthError::unauthorized(format!(
                "Missing admin key. Provide {} header.",
                ADMIN_KEY_HEADER
            )))),
        }
    }
}
