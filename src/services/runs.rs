//! Single run, test and build views.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::db::{DbPool, builds, runs, test_rows};
use crate::entity::test;
use crate::error::AppResult;
use crate::models::{
    BuildBrief, BuildInfo, RunInfo, RunTest, TestStatus, TestView, UNTRACKED_BUILD_ID,
};

use super::history::describe_test;

/// Order in which tests are listed on a run page. Statuses not listed here
/// sort before all of them.
const STATUS_ORDER: [TestStatus; 7] = [
    TestStatus::Failed,
    TestStatus::Timeout,
    TestStatus::Ignored,
    TestStatus::Passed,
    TestStatus::Canceled,
    TestStatus::Running,
    TestStatus::Pending,
];

/// Sort key of a status on a run page.
pub fn status_rank(status: &str) -> usize {
    TestStatus::parse(status)
        .and_then(|s| STATUS_ORDER.iter().position(|&o| o == s))
        .map_or(0, |pos| pos + 1)
}

/// Order tests by status rank, then by start time with unstarted tests first.
pub fn compare_tests(a: &test::Model, b: &test::Model) -> Ordering {
    status_rank(&a.status)
        .cmp(&status_rank(&b.status))
        .then_with(|| a.started.cmp(&b.started))
}

/// All tests of a run, worst outcome first, each with its build.
///
/// `None` when the run does not exist.
pub async fn get_one_run(pool: &DbPool, run_id: i32) -> AppResult<Option<Vec<RunTest>>> {
    let Some(run) = runs::get_run(pool.connection(), run_id).await? else {
        return Ok(None);
    };

    let builds: HashMap<i32, BuildBrief> = builds::get_builds_for_run(pool.connection(), run_id)
        .await?
        .into_iter()
        .map(|row| {
            let brief = BuildBrief {
                build_id: row.build_id,
                status: row.status,
                is_release: row.is_release,
                features: row.features,
            };
            (brief.build_id, brief)
        })
        .collect();

    let mut tests = test_rows::get_tests_for_run(pool.connection(), run_id).await?;
    tests.sort_by(compare_tests);

    let mut listed = Vec::with_capacity(tests.len());
    for test in tests {
        let build = builds
            .get(&test.build_id.unwrap_or(UNTRACKED_BUILD_ID))
            .cloned()
            .unwrap_or_else(BuildBrief::test_specific);
        let test = describe_test(pool, test, &run.branch, false).await?;
        listed.push(RunTest { test, build });
    }

    Ok(Some(listed))
}

/// Summary of a single run. `None` when the run does not exist.
pub async fn get_run_info(pool: &DbPool, run_id: i32) -> AppResult<Option<RunInfo>> {
    Ok(runs::get_run(pool.connection(), run_id)
        .await?
        .map(RunInfo::from))
}

/// A single test with its log contents and its run.
///
/// `None` when the test or its run does not exist.
pub async fn get_one_test(pool: &DbPool, test_id: i32) -> AppResult<Option<TestView>> {
    let Some((test, Some(run))) = test_rows::get_test_with_run(pool.connection(), test_id).await?
    else {
        return Ok(None);
    };

    let test = describe_test(pool, test, &run.branch, true).await?;
    Ok(Some(TestView {
        test,
        run: RunInfo::from(run),
    }))
}

/// A build with its output and its run.
///
/// `None` when the build or its run does not exist.
pub async fn get_build_info(pool: &DbPool, build_id: i32) -> AppResult<Option<BuildInfo>> {
    let Some(build) = builds::get_build(pool.connection(), build_id).await? else {
        return Ok(None);
    };
    let Some(run) = runs::get_run(pool.connection(), build.run_id).await? else {
        return Ok(None);
    };

    Ok(Some(BuildInfo::new(build, RunInfo::from(run))))
}
