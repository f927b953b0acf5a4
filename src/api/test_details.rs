//! Test detail and history handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{BaseBranchHistory, HistoryEntry, TestView};
use crate::services;

/// Get a single test with its logs and run.
#[utoipa::path(
    get,
    path = "/api/test/{test_id}",
    tag = "Tests",
    params(
        ("test_id" = i32, Path, description = "Test id")
    ),
    responses(
        (status = 200, description = "Test details", body = TestView),
        (status = 404, description = "Test not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_test(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let test_id = path.into_inner();
    let test = services::get_one_test(pool.get_ref(), test_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test {}", test_id)))?;

    Ok(HttpResponse::Ok().json(test))
}

/// Get the history of a test's command on its run's branch.
#[utoipa::path(
    get,
    path = "/api/test/{test_id}/history",
    tag = "Tests",
    params(
        ("test_id" = i32, Path, description = "Test id")
    ),
    responses(
        (status = 200, description = "Recent executions, newest first", body = [HistoryEntry]),
        (status = 404, description = "Test not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_test_history(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let test_id = path.into_inner();
    let history = services::get_test_history_by_id(pool.get_ref(), test_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test {}", test_id)))?;

    Ok(HttpResponse::Ok().json(history))
}

/// Compare a test with the history of its command on another branch.
#[utoipa::path(
    get,
    path = "/api/test/{test_id}/history/{branch}",
    tag = "Tests",
    params(
        ("test_id" = i32, Path, description = "Test id"),
        ("branch" = String, Path, description = "Branch to compare with")
    ),
    responses(
        (status = 200, description = "History summary on the branch", body = BaseBranchHistory),
        (status = 404, description = "Test not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_base_branch_history(
    pool: web::Data<DbPool>,
    path: web::Path<(i32, String)>,
) -> AppResult<HttpResponse> {
    let (test_id, branch) = path.into_inner();
    let history = services::get_history_for_base_branch(pool.get_ref(), test_id, &branch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test {}", test_id)))?;

    Ok(HttpResponse::Ok().json(history))
}

/// Configure test routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/test/{test_id}").route(web::get().to(get_test)))
        .service(web::resource("/test/{test_id}/history").route(web::get().to(get_test_history)))
        .service(
            web::resource("/test/{test_id}/history/{branch:.*}")
                .route(web::get().to(get_base_branch_history)),
        );
}
