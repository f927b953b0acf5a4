//! Shared helpers for integration tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, EntityTrait, Set};

use nayduck_lib::api;
use nayduck_lib::auth::AdminKey;
use nayduck_lib::db::test_rows::{self, NewTest};
use nayduck_lib::db::{DbPool, logs, runs};
use nayduck_lib::entity::{build, log, test as test_entity};
use nayduck_lib::middleware::RequestLogger;
use nayduck_lib::models::ScheduleRequest;
use nayduck_lib::services;

/// Admin key used in tests.
pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-integration";

/// Create a fresh, migrated in-memory database.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> DbPool {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    let pool = DbPool::from_connection(conn);
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Timestamp `seconds` after a fixed point in time.
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(seconds)
}

pub fn schedule_request(branch: &str, requester: &str, tests: &[&str]) -> ScheduleRequest {
    ScheduleRequest {
        branch: branch.to_string(),
        sha: "9f3c2a1b7e".to_string(),
        user: "Alice Liddell".to_string(),
        title: "Speed up state sync".to_string(),
        tests: tests.iter().map(|t| t.to_string()).collect(),
        requester: requester.to_string(),
    }
}

/// Schedule a run and return its id.
pub async fn schedule(pool: &DbPool, branch: &str, requester: &str, tests: &[&str]) -> i32 {
    services::schedule_a_run(pool, schedule_request(branch, requester, tests))
        .await
        .expect("Failed to schedule run")
}

/// Tests of a run in insertion order.
pub async fn tests_of_run(pool: &DbPool, run_id: i32) -> Vec<test_entity::Model> {
    let mut tests = test_rows::get_tests_for_run(pool.connection(), run_id)
        .await
        .expect("Failed to load tests");
    tests.sort_by_key(|t| t.test_id);
    tests
}

/// Record an outcome for a test, as a worker would.
pub async fn set_test_result(
    pool: &DbPool,
    test_id: i32,
    status: &str,
    started: Option<DateTime<Utc>>,
    finished: Option<DateTime<Utc>>,
) {
    let model = test_entity::Entity::find_by_id(test_id)
        .one(pool.connection())
        .await
        .expect("Failed to load test")
        .expect("Test not found");

    let mut active: test_entity::ActiveModel = model.into();
    active.status = Set(status.to_string());
    active.started = Set(started);
    active.finished = Set(finished);
    active
        .update(pool.connection())
        .await
        .expect("Failed to update test");
}

/// Record build output, as a builder would.
pub async fn set_build_result(
    pool: &DbPool,
    build_id: i32,
    status: &str,
    stdout: Option<Vec<u8>>,
    stderr: Option<Vec<u8>>,
) {
    let model = build::Entity::find_by_id(build_id)
        .one(pool.connection())
        .await
        .expect("Failed to load build")
        .expect("Build not found");

    let mut active: build::ActiveModel = model.into();
    active.status = Set(status.to_string());
    active.started = Set(Some(at(0)));
    active.finished = Set(Some(at(754)));
    active.stdout = Set(stdout);
    active.stderr = Set(stderr);
    active
        .update(pool.connection())
        .await
        .expect("Failed to update build");
}

/// Attach a log to a test.
pub async fn add_log(pool: &DbPool, test_id: i32, log_type: &str, size: i64, contents: &[u8]) {
    let model = log::ActiveModel {
        test_id: Set(test_id),
        log_type: Set(log_type.to_string()),
        size: Set(size),
        storage: Set(format!("https://logs.nayduck.example/{}/{}", test_id, log_type)),
        stack_trace: Set(log_type == "stderr"),
        patterns: Set(None),
        log: Set(Some(contents.to_vec())),
    };

    logs::insert_log(pool.connection(), model)
        .await
        .expect("Failed to insert log");
}

/// Insert a run whose tests predate build tracking (no build rows, NULL
/// build ids). Returns the run id.
pub async fn insert_legacy_run(pool: &DbPool, branch: &str, statuses: &[&str]) -> i32 {
    let request = schedule_request(branch, "bob", &[]);
    let run_id = runs::insert_run(pool.connection(), &request, at(0))
        .await
        .expect("Failed to insert run");

    for (i, status) in statuses.iter().enumerate() {
        let test_id = test_rows::insert_test(
            pool.connection(),
            NewTest {
                run_id,
                build_id: None,
                name: format!("pytest sanity/legacy_{}.py", i),
                priority: 0,
                release: false,
                remote: false,
            },
        )
        .await
        .expect("Failed to insert test");
        set_test_result(pool, test_id, status, None, None).await;
    }

    run_id
}

/// Create an app with every API route mounted under `/api`.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(AdminKey::new(Some(TEST_ADMIN_KEY.to_string()))))
            .service(web::scope("/api").configure(api::configure_api)),
    )
    .await
}
