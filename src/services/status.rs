//! Dashboard aggregation: the latest runs with per-build test counts.

use std::collections::{BTreeMap, HashMap};

use crate::db::test_rows::{self, StatusCountRow};
use crate::db::{DbPool, builds, runs};
use crate::error::AppResult;
use crate::models::{BuildSummary, RunInfo, RunSummary, StatusCounts, UNTRACKED_BUILD_ID};

/// Number of runs listed on the dashboard.
pub const RUNS_ON_DASHBOARD: u64 = 100;

/// Test counts keyed by (run id, build id).
pub type StatusTally = HashMap<(i32, i32), StatusCounts>;

/// Test status counts for every build of the runs with an id in
/// `min_run_id..=max_run_id`.
pub async fn statuses_for_runs(
    pool: &DbPool,
    min_run_id: i32,
    max_run_id: i32,
) -> AppResult<StatusTally> {
    let rows = test_rows::count_statuses_for_runs(pool.connection(), min_run_id, max_run_id).await?;
    Ok(tally_statuses(rows))
}

/// Fold grouped status counts into per-build tallies. Tests without a build
/// are counted under the untracked build.
pub fn tally_statuses(rows: impl IntoIterator<Item = StatusCountRow>) -> StatusTally {
    let mut tally = StatusTally::new();
    for row in rows {
        let build_id = row.build_id.unwrap_or(UNTRACKED_BUILD_ID);
        tally
            .entry((row.run_id, build_id))
            .or_default()
            .record(&row.status, row.cnt.max(0) as u64);
    }
    tally
}

/// The latest runs, newest first, each with its builds and their test counts.
///
/// Runs without any build rows get the untracked stand-in build.
pub async fn get_all_runs(pool: &DbPool) -> AppResult<Vec<RunSummary>> {
    let latest = runs::get_latest_runs(pool.connection(), RUNS_ON_DASHBOARD).await?;
    let (Some(min_id), Some(max_id)) = (
        latest.iter().map(|r| r.id).min(),
        latest.iter().map(|r| r.id).max(),
    ) else {
        return Ok(Vec::new());
    };

    let statuses = statuses_for_runs(pool, min_id, max_id).await?;
    let build_rows = builds::get_builds_for_run_range(pool.connection(), min_id, max_id).await?;

    let mut summaries: BTreeMap<i32, RunSummary> = latest
        .into_iter()
        .map(|run| {
            let summary = RunSummary {
                run: RunInfo::from(run),
                builds: Vec::new(),
            };
            (summary.run.id, summary)
        })
        .collect();

    for build in build_rows {
        // the id range can cover older runs that fell off the dashboard
        let Some(summary) = summaries.get_mut(&build.run_id) else {
            continue;
        };
        let counts = statuses
            .get(&(build.run_id, build.build_id))
            .copied()
            .unwrap_or_default();
        summary.builds.push(BuildSummary {
            build_id: build.build_id,
            status: build.status,
            is_release: build.is_release,
            features: build.features,
            tests: counts,
        });
    }

    Ok(summaries
        .into_values()
        .rev()
        .map(|mut summary| {
            if summary.builds.is_empty() {
                summary.builds.push(BuildSummary::test_specific());
            }
            summary
        })
        .collect())
}
