//! Test history lookups.

use nayduck_lib::models::HistoryStats;
use nayduck_lib::services::{self, HISTORY_LENGTH};

use super::helpers::*;

const COMMAND: &str = "pytest sanity/state_sync.py manytx 115";

#[tokio::test]
async fn test_history_is_limited_and_newest_first() {
    let pool = create_test_pool().await;
    for _ in 0..HISTORY_LENGTH + 5 {
        schedule(&pool, "master", "alice", &[COMMAND]).await;
    }

    let history = services::get_test_history(&pool, COMMAND, "master", false)
        .await
        .unwrap();

    assert_eq!(history.len(), HISTORY_LENGTH as usize);
    assert!(history.windows(2).all(|w| w[0].test_id > w[1].test_id));
    assert!(history.iter().all(|h| h.logs.is_none()));
    assert_eq!(history[0].branch, "master");
    assert_eq!(history[0].requester, "alice");
    assert_eq!(history[0].title, "Speed up state sync");
}

#[tokio::test]
async fn test_history_filters_by_branch_and_command() {
    let pool = create_test_pool().await;
    let master = schedule(&pool, "master", "alice", &[COMMAND]).await;
    schedule(&pool, "feature/sync", "alice", &[COMMAND]).await;
    schedule(&pool, "master", "alice", &["pytest sanity/other.py"]).await;

    let history = services::get_test_history(&pool, COMMAND, "master", false)
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].test_id, tests_of_run(&pool, master).await[0].test_id);

    let none = services::get_test_history(&pool, COMMAND, "release-1.30", false)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_history_reports_run_time() {
    let pool = create_test_pool().await;
    let finished = schedule(&pool, "master", "alice", &[COMMAND]).await;
    let running = schedule(&pool, "master", "alice", &[COMMAND]).await;
    let finished_test = tests_of_run(&pool, finished).await[0].test_id;
    let running_test = tests_of_run(&pool, running).await[0].test_id;
    set_test_result(&pool, finished_test, "PASSED", Some(at(0)), Some(at(125))).await;
    set_test_result(&pool, running_test, "RUNNING", Some(at(200)), None).await;

    let history = services::get_test_history(&pool, COMMAND, "master", false)
        .await
        .unwrap();

    assert_eq!(history[0].test_id, running_test);
    assert_eq!(history[0].run_time, None);
    assert_eq!(history[1].run_time.as_deref(), Some("0:02:05"));
}

#[tokio::test]
async fn test_history_by_id_includes_log_metadata() {
    let pool = create_test_pool().await;
    let older = schedule(&pool, "master", "alice", &[COMMAND]).await;
    let newer = schedule(&pool, "master", "alice", &[COMMAND]).await;
    let older_test = tests_of_run(&pool, older).await[0].test_id;
    let newer_test = tests_of_run(&pool, newer).await[0].test_id;
    add_log(&pool, older_test, "stdout", 12_345, b"ok").await;
    add_log(&pool, older_test, "stderr", 999, b"panicked").await;

    let history = services::get_test_history_by_id(&pool, newer_test)
        .await
        .unwrap()
        .expect("test should exist");

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].logs.as_deref(), Some(&[][..]));

    let logs = history[1].logs.as_ref().unwrap();
    let types: Vec<&str> = logs.iter().map(|l| l.log_type.as_str()).collect();
    assert_eq!(types, vec!["stderr", "stdout"]);
    assert_eq!(logs[0].full_size, "999");
    assert!(logs[0].stack_trace);
    assert_eq!(logs[1].full_size, "12k");
    assert!(logs.iter().all(|l| l.log.is_none()));
}

#[tokio::test]
async fn test_history_by_id_unknown_test() {
    let pool = create_test_pool().await;

    let history = services::get_test_history_by_id(&pool, 4242).await.unwrap();

    assert!(history.is_none());
}

#[tokio::test]
async fn test_base_branch_history() {
    let pool = create_test_pool().await;
    let first = schedule(&pool, "master", "alice", &[COMMAND]).await;
    let second = schedule(&pool, "master", "alice", &[COMMAND]).await;
    let feature = schedule(&pool, "feature/sync", "alice", &[COMMAND]).await;
    let first_test = tests_of_run(&pool, first).await[0].test_id;
    let second_test = tests_of_run(&pool, second).await[0].test_id;
    let feature_test = tests_of_run(&pool, feature).await[0].test_id;
    set_test_result(&pool, first_test, "PASSED", None, None).await;
    set_test_result(&pool, second_test, "TIMEOUT", None, None).await;

    let base = services::get_history_for_base_branch(&pool, feature_test, "master")
        .await
        .unwrap()
        .expect("test should exist");

    assert_eq!(base.test_id, Some(second_test));
    assert_eq!(
        base.history,
        HistoryStats {
            passed: 1,
            failed: 1,
            other: 0
        }
    );
}

#[tokio::test]
async fn test_base_branch_without_history() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "feature/sync", "alice", &[COMMAND]).await;
    let test_id = tests_of_run(&pool, run_id).await[0].test_id;

    let base = services::get_history_for_base_branch(&pool, test_id, "master")
        .await
        .unwrap()
        .expect("test should exist");

    assert_eq!(base.test_id, None);
    assert_eq!(base.history, HistoryStats::default());

    let unknown = services::get_history_for_base_branch(&pool, 4242, "master")
        .await
        .unwrap();
    assert!(unknown.is_none());
}
