//! Database operations for runs.

use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entity::run;
use crate::error::AppResult;
use crate::models::ScheduleRequest;

/// Insert a run row and return its id.
pub async fn insert_run<C: ConnectionTrait>(
    db: &C,
    request: &ScheduleRequest,
    started: DateTime<Utc>,
) -> AppResult<i32> {
    let model = run::ActiveModel {
        branch: Set(request.branch.clone()),
        sha: Set(request.sha.clone()),
        user: Set(request.user.clone()),
        title: Set(request.title.clone()),
        requester: Set(request.requester.clone()),
        started: Set(started),
        ..Default::default()
    };

    let result = run::Entity::insert(model).exec(db).await?;
    Ok(result.last_insert_id)
}

/// Find a run by id.
pub async fn get_run<C: ConnectionTrait>(db: &C, run_id: i32) -> AppResult<Option<run::Model>> {
    Ok(run::Entity::find_by_id(run_id).one(db).await?)
}

/// Most recent runs, newest first.
pub async fn get_latest_runs<C: ConnectionTrait>(db: &C, limit: u64) -> AppResult<Vec<run::Model>> {
    let runs = run::Entity::find()
        .order_by_desc(run::Column::Id)
        .limit(limit)
        .all(db)
        .await?;

    Ok(runs)
}
