//! Run API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::CodeAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CancelRunRequest, CancelRunResponse, NewRunRequest, NewRunResponse, RunSummary, RunTest,
};
use crate::services;

/// List the latest runs with per-build test counts.
#[utoipa::path(
    get,
    path = "/api/runs",
    tag = "Runs",
    responses(
        (status = 200, description = "Latest runs, newest first", body = [RunSummary]),
    )
)]
pub async fn list_runs(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let runs = services::get_all_runs(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(runs))
}

/// Get all tests of a run.
#[utoipa::path(
    get,
    path = "/api/run/{run_id}",
    tag = "Runs",
    params(
        ("run_id" = i32, Path, description = "Run id")
    ),
    responses(
        (status = 200, description = "Tests of the run, worst outcome first", body = [RunTest]),
        (status = 404, description = "Run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_run(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();
    let tests = services::get_one_run(pool.get_ref(), run_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Run {}", run_id)))?;

    Ok(HttpResponse::Ok().json(tests))
}

/// Schedule a new run. The requester is the login the auth code belongs to.
#[utoipa::path(
    post,
    path = "/api/run/new",
    tag = "Runs",
    request_body = NewRunRequest,
    responses(
        (status = 201, description = "Run scheduled", body = NewRunResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("auth_code" = [])
    )
)]
pub async fn new_run(
    auth: CodeAuth,
    pool: web::Data<DbPool>,
    body: web::Json<NewRunRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    if request.sha.trim().is_empty() {
        return Err(AppError::InvalidInput("sha must not be empty".to_string()));
    }
    if request.tests.is_empty() {
        return Err(AppError::InvalidInput(
            "tests must contain at least one test".to_string(),
        ));
    }

    let run_id = services::schedule_a_run(pool.get_ref(), request.into_schedule(auth.login)).await?;

    Ok(HttpResponse::Created().json(NewRunResponse { run_id }))
}

/// Cancel the pending tests of a run.
#[utoipa::path(
    post,
    path = "/api/run/{run_id}/cancel",
    tag = "Runs",
    params(
        ("run_id" = i32, Path, description = "Run id")
    ),
    request_body(content = CancelRunRequest, description = "Optional status to give pending tests"),
    responses(
        (status = 200, description = "Pending tests cancelled", body = CancelRunResponse),
        (status = 400, description = "Invalid cancel status", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Run not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("auth_code" = [])
    )
)]
pub async fn cancel_run(
    auth: CodeAuth,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: Option<web::Json<CancelRunRequest>>,
) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();
    let request = body.map(web::Json::into_inner).unwrap_or_default();

    services::get_run_info(pool.get_ref(), run_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Run {}", run_id)))?;

    info!(run_id, login = %auth.login, status = request.status(), "Cancel requested");
    let canceled = services::cancel_the_run(pool.get_ref(), run_id, request.status()).await?;

    Ok(HttpResponse::Ok().json(CancelRunResponse { run_id, canceled }))
}

/// Configure run routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/runs").route(web::get().to(list_runs)))
        .service(web::resource("/run/new").route(web::post().to(new_run)))
        .service(web::resource("/run/{run_id}").route(web::get().to(get_run)))
        .service(web::resource("/run/{run_id}/cancel").route(web::post().to(cancel_run)));
}
