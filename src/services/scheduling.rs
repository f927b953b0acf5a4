//! Scheduling and cancelling runs.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::db::test_rows::{self, NewTest};
use crate::db::{DbPool, builds, runs};
use crate::error::{AppError, AppResult};
use crate::models::{
    BuildKey, CANCEL_STATUSES, ScheduleRequest, TestSpec, TestStatus, priority_for,
};

/// Schedule a run with all of its tests and the builds they need.
///
/// Tests sharing a (release, features) pair share one build. The run, its
/// builds and its tests are written atomically: on any failure nothing is
/// stored.
pub async fn schedule_a_run(pool: &DbPool, request: ScheduleRequest) -> AppResult<i32> {
    if request.tests.iter().all(|t| t.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "a run needs at least one test".to_string(),
        ));
    }

    let sha = request.sha.clone();
    let requester = request.requester.clone();
    let test_count = request.tests.len();

    let run_id = pool
        .with_transaction(move |txn| {
            Box::pin(async move { insert_run_tree(txn, &request).await })
        })
        .await?;

    info!(run_id, %sha, %requester, tests = test_count, "Scheduled run");

    Ok(run_id)
}

async fn insert_run_tree<C: ConnectionTrait>(db: &C, request: &ScheduleRequest) -> AppResult<i32> {
    let run_id = runs::insert_run(db, request, Utc::now()).await?;
    let priority = priority_for(&request.requester);
    let mut build_ids: HashMap<BuildKey, i32> = HashMap::new();

    for command in request.tests.iter().filter(|t| !t.trim().is_empty()) {
        let spec = TestSpec::parse(command);
        let key = spec.build_key();

        let build_id = match build_ids.get(&key) {
            Some(&id) => id,
            None => {
                let status = spec.initial_build_status();
                let id = builds::insert_build(db, run_id, &key, status).await?;
                build_ids.insert(key, id);
                id
            }
        };

        test_rows::insert_test(
            db,
            NewTest {
                run_id,
                build_id: Some(build_id),
                name: spec.name,
                priority,
                release: spec.release,
                remote: spec.remote,
            },
        )
        .await?;
    }

    Ok(run_id)
}

/// Terminate every PENDING test of a run with `status`.
///
/// Only CANCELED, IGNORED and SKIPPED are accepted; anything else is
/// `InvalidInput` and nothing is changed. Tests already picked up by a worker
/// are left alone, so calling this again changes nothing. Returns the number
/// of tests changed.
pub async fn cancel_the_run(pool: &DbPool, run_id: i32, status: &str) -> AppResult<u64> {
    let status = parse_cancel_status(status)?;
    let canceled =
        test_rows::cancel_pending_tests(pool.connection(), run_id, status.as_str(), Utc::now())
            .await?;

    info!(run_id, %status, canceled, "Cancelled pending tests");
    Ok(canceled)
}

fn parse_cancel_status(status: &str) -> AppResult<TestStatus> {
    TestStatus::parse(status)
        .filter(|parsed| CANCEL_STATUSES.contains(parsed))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "cannot cancel tests with status '{}'; use CANCELED, IGNORED or SKIPPED",
                status
            ))
        })
}
