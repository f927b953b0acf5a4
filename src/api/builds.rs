//! Build API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::BuildInfo;
use crate::services;

/// Get a build with its output and run.
#[utoipa::path(
    get,
    path = "/api/build/{build_id}",
    tag = "Builds",
    params(
        ("build_id" = i32, Path, description = "Build id")
    ),
    responses(
        (status = 200, description = "Build details", body = BuildInfo),
        (status = 404, description = "Build not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_build(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let build_id = path.into_inner();
    let build = services::get_build_info(pool.get_ref(), build_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Build {}", build_id)))?;

    Ok(HttpResponse::Ok().json(build))
}

/// Configure build routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/build/{build_id}").route(web::get().to(get_build)));
}
