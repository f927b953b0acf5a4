//! Database operations for builds.

use sea_orm::*;

use crate::entity::build;
use crate::error::AppResult;
use crate::models::{BuildKey, TestStatus};

/// Build columns needed by listings; leaves out the output blobs.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct BuildRow {
    pub build_id: i32,
    pub run_id: i32,
    pub status: String,
    pub is_release: bool,
    pub features: String,
}

/// Insert a build for `run_id` and return its id.
pub async fn insert_build<C: ConnectionTrait>(
    db: &C,
    run_id: i32,
    key: &BuildKey,
    status: TestStatus,
) -> AppResult<i32> {
    let model = build::ActiveModel {
        run_id: Set(run_id),
        status: Set(status.as_str().to_string()),
        is_release: Set(key.release),
        features: Set(key.features.clone()),
        started: Set(None),
        finished: Set(None),
        stdout: Set(None),
        stderr: Set(None),
        ..Default::default()
    };

    let result = build::Entity::insert(model).exec(db).await?;
    Ok(result.last_insert_id)
}

/// Find a build by id, output included.
pub async fn get_build<C: ConnectionTrait>(
    db: &C,
    build_id: i32,
) -> AppResult<Option<build::Model>> {
    Ok(build::Entity::find_by_id(build_id).one(db).await?)
}

/// Builds of one run, ordered by id.
pub async fn get_builds_for_run<C: ConnectionTrait>(
    db: &C,
    run_id: i32,
) -> AppResult<Vec<BuildRow>> {
    let rows = listing()
        .filter(build::Column::RunId.eq(run_id))
        .into_model::<BuildRow>()
        .all(db)
        .await?;

    Ok(rows)
}

/// Builds of every run with an id in `min_run_id..=max_run_id`, ordered by id.
pub async fn get_builds_for_run_range<C: ConnectionTrait>(
    db: &C,
    min_run_id: i32,
    max_run_id: i32,
) -> AppResult<Vec<BuildRow>> {
    let rows = listing()
        .filter(build::Column::RunId.between(min_run_id, max_run_id))
        .into_model::<BuildRow>()
        .all(db)
        .await?;

    Ok(rows)
}

fn listing() -> Select<build::Entity> {
    build::Entity::find()
        .select_only()
        .columns([
            build::Column::BuildId,
            build::Column::RunId,
            build::Column::Status,
            build::Column::IsRelease,
            build::Column::Features,
        ])
        .order_by_asc(build::Column::BuildId)
}
