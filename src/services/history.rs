//! Test history and per-test enrichment.

use std::collections::BTreeMap;

use crate::db::test_rows::{self, HistoryRow};
use crate::db::{DbPool, logs};
use crate::entity::test;
use crate::error::AppResult;
use crate::models::{
    BaseBranchHistory, HistoryEntry, HistoryStats, LogInfo, TestDetail, UNTRACKED_BUILD_ID,
    display_name, format_elapsed,
};

/// Maximum number of past executions considered.
pub const HISTORY_LENGTH: u64 = 30;

/// Recent executions of the command `name` on `branch`, newest first.
///
/// With `with_logs`, each entry lists its logs (metadata only) ordered by type.
pub async fn get_test_history(
    pool: &DbPool,
    name: &str,
    branch: &str,
    with_logs: bool,
) -> AppResult<Vec<HistoryEntry>> {
    let rows = test_rows::get_history_rows(pool.connection(), name, branch, HISTORY_LENGTH).await?;

    let mut history = Vec::with_capacity(rows.len());
    for row in rows {
        let logs = if with_logs {
            let metas = logs::get_log_meta_for_test(pool.connection(), row.test_id).await?;
            Some(metas.into_iter().map(|m| LogInfo::new(m, None)).collect())
        } else {
            None
        };
        history.push(history_entry(row, logs));
    }

    Ok(history)
}

fn history_entry(row: HistoryRow, logs: Option<Vec<LogInfo>>) -> HistoryEntry {
    HistoryEntry {
        run_time: format_elapsed(row.started, row.finished),
        test_id: row.test_id,
        requester: row.requester,
        title: row.title,
        status: row.status,
        started: row.started,
        finished: row.finished,
        branch: row.branch,
        sha: row.sha,
        logs,
    }
}

/// Pass/fail summary of a history.
pub fn history_stats(history: &[HistoryEntry]) -> HistoryStats {
    history.iter().map(|entry| entry.status.as_str()).collect()
}

/// History, with logs, of the command a test ran, on the branch of its run.
///
/// `None` when the test (or its run) does not exist.
pub async fn get_test_history_by_id(
    pool: &DbPool,
    test_id: i32,
) -> AppResult<Option<Vec<HistoryEntry>>> {
    let Some((test, Some(run))) = test_rows::get_test_with_run(pool.connection(), test_id).await?
    else {
        return Ok(None);
    };

    let history = get_test_history(pool, &test.name, &run.branch, true).await?;
    Ok(Some(history))
}

/// How the command of a test fared on another branch.
///
/// `None` when the test does not exist.
pub async fn get_history_for_base_branch(
    pool: &DbPool,
    test_id: i32,
    branch: &str,
) -> AppResult<Option<BaseBranchHistory>> {
    let Some(test) = test_rows::get_test(pool.connection(), test_id).await? else {
        return Ok(None);
    };

    let history = get_test_history(pool, &test.name, branch, false).await?;
    Ok(Some(BaseBranchHistory {
        history: history_stats(&history),
        test_id: history.first().map(|entry| entry.test_id),
    }))
}

/// Enrich a test with its logs, display name, elapsed time and the summary
/// of its command's history on `branch`.
///
/// With `with_blobs`, each log carries its stored (truncated) contents.
pub async fn describe_test(
    pool: &DbPool,
    test: test::Model,
    branch: &str,
    with_blobs: bool,
) -> AppResult<TestDetail> {
    let logs: BTreeMap<String, LogInfo> = if with_blobs {
        logs::get_logs_for_test(pool.connection(), test.test_id)
            .await?
            .into_iter()
            .map(|model| {
                let blob = model.log.clone();
                LogInfo::new(model.into(), blob.as_deref())
            })
            .map(|info| (info.log_type.clone(), info))
            .collect()
    } else {
        logs::get_log_meta_for_test(pool.connection(), test.test_id)
            .await?
            .into_iter()
            .map(|meta| LogInfo::new(meta, None))
            .map(|info| (info.log_type.clone(), info))
            .collect()
    };

    let history = get_test_history(pool, &test.name, branch, false).await?;

    Ok(TestDetail {
        test_id: test.test_id,
        run_id: test.run_id,
        build_id: test.build_id.unwrap_or(UNTRACKED_BUILD_ID),
        name: display_name(&test.name),
        test_time: format_elapsed(test.started, test.finished),
        history: history_stats(&history),
        cmd: test.name,
        priority: test.priority,
        release: test.release,
        remote: test.remote,
        status: test.status,
        started: test.started,
        finished: test.finished,
        logs,
    })
}
