//! Database operations for tests.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entity::{run, test};
use crate::error::AppResult;
use crate::models::TestStatus;

/// A test row to insert.
#[derive(Debug, Clone)]
pub struct NewTest {
    pub run_id: i32,
    pub build_id: Option<i32>,
    pub name: String,
    pub priority: i32,
    pub release: bool,
    pub remote: bool,
}

/// Number of tests of one (run, build) pair in one status.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct StatusCountRow {
    pub run_id: i32,
    pub build_id: Option<i32>,
    pub status: String,
    pub cnt: i64,
}

/// A past execution of a test joined with its run.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct HistoryRow {
    pub test_id: i32,
    pub requester: String,
    pub title: String,
    pub status: String,
    pub started: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    pub branch: String,
    pub sha: String,
}

/// Insert a PENDING test and return its id.
pub async fn insert_test<C: ConnectionTrait>(db: &C, new_test: NewTest) -> AppResult<i32> {
    let model = test::ActiveModel {
        run_id: Set(new_test.run_id),
        build_id: Set(new_test.build_id),
        name: Set(new_test.name),
        priority: Set(new_test.priority),
        release: Set(new_test.release),
        remote: Set(new_test.remote),
        status: Set(TestStatus::Pending.as_str().to_string()),
        started: Set(None),
        finished: Set(None),
        ..Default::default()
    };

    let result = test::Entity::insert(model).exec(db).await?;
    Ok(result.last_insert_id)
}

/// Move every PENDING test of a run to `status`, stamping `finished`.
///
/// Returns the number of tests changed.
pub async fn cancel_pending_tests<C: ConnectionTrait>(
    db: &C,
    run_id: i32,
    status: &str,
    finished: DateTime<Utc>,
) -> AppResult<u64> {
    let result = test::Entity::update_many()
        .col_expr(test::Column::Status, Expr::value(status))
        .col_expr(test::Column::Finished, Expr::value(finished))
        .filter(test::Column::RunId.eq(run_id))
        .filter(test::Column::Status.eq(TestStatus::Pending.as_str()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Find a test by id.
pub async fn get_test<C: ConnectionTrait>(db: &C, test_id: i32) -> AppResult<Option<test::Model>> {
    Ok(test::Entity::find_by_id(test_id).one(db).await?)
}

/// Find a test together with the run it belongs to.
pub async fn get_test_with_run<C: ConnectionTrait>(
    db: &C,
    test_id: i32,
) -> AppResult<Option<(test::Model, Option<run::Model>)>> {
    let result = test::Entity::find_by_id(test_id)
        .find_also_related(run::Entity)
        .one(db)
        .await?;

    Ok(result)
}

/// All tests of a run, unordered.
pub async fn get_tests_for_run<C: ConnectionTrait>(
    db: &C,
    run_id: i32,
) -> AppResult<Vec<test::Model>> {
    let tests = test::Entity::find()
        .filter(test::Column::RunId.eq(run_id))
        .all(db)
        .await?;

    Ok(tests)
}

/// Count tests grouped by run, build and status for runs with an id in
/// `min_run_id..=max_run_id`.
pub async fn count_statuses_for_runs<C: ConnectionTrait>(
    db: &C,
    min_run_id: i32,
    max_run_id: i32,
) -> AppResult<Vec<StatusCountRow>> {
    let rows = test::Entity::find()
        .select_only()
        .columns([test::Column::RunId, test::Column::BuildId, test::Column::Status])
        .column_as(test::Column::Status.count(), "cnt")
        .filter(test::Column::RunId.between(min_run_id, max_run_id))
        .group_by(test::Column::RunId)
        .group_by(test::Column::BuildId)
        .group_by(test::Column::Status)
        .into_model::<StatusCountRow>()
        .all(db)
        .await?;

    Ok(rows)
}

/// Most recent executions of the command `name` on `branch`, newest first.
pub async fn get_history_rows<C: ConnectionTrait>(
    db: &C,
    name: &str,
    branch: &str,
    limit: u64,
) -> AppResult<Vec<HistoryRow>> {
    let rows = test::Entity::find()
        .select_only()
        .columns([
            test::Column::TestId,
            test::Column::Status,
            test::Column::Started,
            test::Column::Finished,
        ])
        .column_as(run::Column::Requester, "requester")
        .column_as(run::Column::Title, "title")
        .column_as(run::Column::Branch, "branch")
        .column_as(run::Column::Sha, "sha")
        .inner_join(run::Entity)
        .filter(test::Column::Name.eq(name))
        .filter(run::Column::Branch.eq(branch))
        .order_by_desc(test::Column::TestId)
        .limit(limit)
        .into_model::<HistoryRow>()
        .all(db)
        .await?;

    Ok(rows)
}
