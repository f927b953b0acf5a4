//! Dashboard aggregation against a real database.

use nayduck_lib::db::builds;
use nayduck_lib::models::{BuildKey, StatusCounts, TEST_SPECIFIC_STATUS, TestStatus};
use nayduck_lib::services;

use super::helpers::*;

#[tokio::test]
async fn test_empty_dashboard() {
    let pool = create_test_pool().await;

    let runs = services::get_all_runs(&pool).await.unwrap();

    assert!(runs.is_empty());
}

#[tokio::test]
async fn test_counts_per_build() {
    let pool = create_test_pool().await;
    let run_id = schedule(
        &pool,
        "master",
        "alice",
        &[
            "pytest sanity/a.py --release",
            "pytest sanity/b.py --release",
            "pytest sanity/c.py --release",
            "pytest sanity/d.py",
        ],
    )
    .await;
    let tests = tests_of_run(&pool, run_id).await;
    set_test_result(&pool, tests[0].test_id, "PASSED", None, None).await;
    set_test_result(&pool, tests[1].test_id, "FAILED", None, None).await;
    set_test_result(&pool, tests[2].test_id, "TIMEOUT", None, None).await;
    set_test_result(&pool, tests[3].test_id, "BUILD FAILED", None, None).await;

    let runs = services::get_all_runs(&pool).await.unwrap();

    assert_eq!(runs.len(), 1);
    let summary = &runs[0];
    assert_eq!(summary.run.id, run_id);
    assert_eq!(summary.builds.len(), 2);

    let release = summary.builds.iter().find(|b| b.is_release).unwrap();
    assert_eq!(
        release.tests,
        StatusCounts {
            passed: 1,
            timeout: 1,
            failed: 1,
            ..StatusCounts::default()
        }
    );

    let debug = summary.builds.iter().find(|b| !b.is_release).unwrap();
    assert_eq!(debug.tests.build_failed, 1);
    assert_eq!(debug.tests.failed, 1);
    assert_eq!(debug.tests.categorized(), 1);
}

#[tokio::test]
async fn test_build_without_tests_has_zero_counts() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "master", "alice", &["pytest sanity/a.py"]).await;
    let extra = builds::insert_build(
        pool.connection(),
        run_id,
        &BuildKey {
            release: true,
            features: "--features=adversarial".to_string(),
        },
        TestStatus::Pending,
    )
    .await
    .unwrap();

    let runs = services::get_all_runs(&pool).await.unwrap();

    let build = runs[0]
        .builds
        .iter()
        .find(|b| b.build_id == extra)
        .expect("extra build should be listed");
    assert_eq!(build.tests, StatusCounts::default());
    assert_eq!(runs[0].builds[0].tests.pending, 1);
}

#[tokio::test]
async fn test_legacy_run_gets_test_specific_build() {
    let pool = create_test_pool().await;
    let legacy = insert_legacy_run(&pool, "master", &["PASSED", "FAILED"]).await;
    let tracked = schedule(&pool, "master", "alice", &["pytest sanity/a.py"]).await;

    let runs = services::get_all_runs(&pool).await.unwrap();

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].run.id, tracked);
    assert_eq!(runs[1].run.id, legacy);

    let builds = &runs[1].builds;
    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].build_id, 0);
    assert_eq!(builds[0].status, TEST_SPECIFIC_STATUS);
    assert!(!builds[0].is_release);
    assert_eq!(builds[0].tests, StatusCounts::default());
}

#[tokio::test]
async fn test_untracked_tests_are_counted_under_build_zero() {
    let pool = create_test_pool().await;
    let legacy = insert_legacy_run(&pool, "master", &["PASSED", "PASSED", "CANCELED"]).await;

    let tally = services::statuses_for_runs(&pool, legacy, legacy)
        .await
        .unwrap();

    let counts = tally[&(legacy, 0)];
    assert_eq!(counts.passed, 2);
    assert_eq!(counts.canceled, 1);
}

#[tokio::test]
async fn test_dashboard_lists_latest_runs_newest_first() {
    let pool = create_test_pool().await;
    let mut run_ids = Vec::new();
    for i in 0..101 {
        let command = format!("pytest sanity/test_{}.py", i);
        run_ids.push(schedule(&pool, "master", "alice", &[command.as_str()]).await);
    }

    let runs = services::get_all_runs(&pool).await.unwrap();

    assert_eq!(runs.len(), 100);
    assert_eq!(runs[0].run.id, run_ids[100]);
    assert_eq!(runs[99].run.id, run_ids[1]);
    assert!(runs.windows(2).all(|w| w[0].run.id > w[1].run.id));
    assert!(runs.iter().all(|r| r.builds.len() == 1));
}
