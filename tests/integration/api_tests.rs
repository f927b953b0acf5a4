//! HTTP API tests.

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use nayduck_lib::config::ADMIN_KEY_HEADER;

use super::helpers::*;

/// Issue an auth code for `login` through the admin endpoint.
async fn issue_code<S>(app: &S, login: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/code")
        .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
        .set_json(json!({ "login": login }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["login"], login);
    body["code"].as_str().unwrap().to_string()
}

fn get(uri: &str) -> actix_http::Request {
    test::TestRequest::get().uri(uri).to_request()
}

fn new_run_body() -> Value {
    json!({
        "branch": "master",
        "sha": "9f3c2a1b7e",
        "user": "Alice Liddell",
        "title": "Speed up state sync",
        "tests": ["pytest sanity/a.py", "pytest sanity/b.py --release"]
    })
}

#[actix_rt::test]
async fn test_health_and_info() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, get("/api/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, get("/api/ready")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, get("/api/info")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_rt::test]
async fn test_list_runs() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "master", "alice", &["pytest sanity/a.py"]).await;
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, get("/api/runs")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let runs = body.as_array().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["id"], run_id);
    assert_eq!(runs[0]["branch"], "master");
    assert_eq!(runs[0]["builds"][0]["tests"]["pending"], 1);
}

#[actix_rt::test]
async fn test_new_run_requires_auth_code() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let missing = test::TestRequest::post()
        .uri("/api/run/new")
        .set_json(new_run_body())
        .to_request();
    assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::UNAUTHORIZED);

    let unknown = test::TestRequest::post()
        .uri("/api/run/new")
        .insert_header((header::AUTHORIZATION, "nayduck NOTAREALCODE0000000"))
        .set_json(new_run_body())
        .to_request();
    assert_eq!(test::call_service(&app, unknown).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_new_run_with_auth_code() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let code = issue_code(&app, "alice").await;

    let req = test::TestRequest::post()
        .uri("/api/run/new")
        .insert_header((header::AUTHORIZATION, format!("nayduck {}", code)))
        .set_json(new_run_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let run_id = body["run_id"].as_i64().unwrap() as i32;

    let run = nayduck_lib::db::runs::get_run(pool.connection(), run_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(run.requester, "alice");
    assert_eq!(tests_of_run(&pool, run_id).await.len(), 2);
}

#[actix_rt::test]
async fn test_new_run_rejects_empty_tests() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let code = issue_code(&app, "alice").await;

    let mut body = new_run_body();
    body["tests"] = json!([]);
    let req = test::TestRequest::post()
        .uri("/api/run/new")
        .insert_header((header::AUTHORIZATION, format!("nayduck {}", code)))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_cancel_run() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "master", "alice", &["pytest a.py", "pytest b.py"]).await;
    let app = create_test_app(&pool).await;
    let code = issue_code(&app, "alice").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/run/{}/cancel", run_id))
        .insert_header((header::AUTHORIZATION, format!("nayduck {}", code)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["canceled"], 2);
    assert!(tests_of_run(&pool, run_id).await.iter().all(|t| t.status == "CANCELED"));

    let missing = test::TestRequest::post()
        .uri("/api/run/4242/cancel")
        .insert_header((header::AUTHORIZATION, format!("nayduck {}", code)))
        .to_request();
    assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_cancel_rejects_verdict_status() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "master", "alice", &["pytest a.py", "pytest b.py"]).await;
    let app = create_test_app(&pool).await;
    let code = issue_code(&app, "mallory").await;

    for status in ["PASSED", "PENDING", ""] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/run/{}/cancel", run_id))
            .insert_header((header::AUTHORIZATION, format!("nayduck {}", code)))
            .set_json(json!({ "status": status }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{:?}", status);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INVALID_INPUT");
    }

    assert!(tests_of_run(&pool, run_id).await.iter().all(|t| t.status == "PENDING"));
}

#[actix_rt::test]
async fn test_issue_code_needs_admin_key() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let wrong = test::TestRequest::post()
        .uri("/api/auth/code")
        .insert_header((ADMIN_KEY_HEADER, "not-the-key"))
        .set_json(json!({ "login": "mallory" }))
        .to_request();
    assert_eq!(test::call_service(&app, wrong).await.status(), StatusCode::UNAUTHORIZED);

    let first = issue_code(&app, "alice").await;
    let again = issue_code(&app, "alice").await;
    assert_eq!(first, again);
}

#[actix_rt::test]
async fn test_missing_resources_are_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    for uri in ["/api/run/4242", "/api/test/4242", "/api/test/4242/history", "/api/build/4242"] {
        let resp = test::call_service(&app, get(uri)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_rt::test]
async fn test_base_branch_history_endpoint() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "feature/sync", "alice", &["pytest sanity/a.py"]).await;
    let test_id = tests_of_run(&pool, run_id).await[0].test_id;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/test/{}/history/master", test_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "history": {"PASSED": 0, "FAILED": 0, "OTHER": 0},
            "test_id": -1
        })
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/test/{}/history/release/1.30", test_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_test_page_endpoint() {
    let pool = create_test_pool().await;
    let run_id = schedule(&pool, "master", "alice", &["pytest sanity/a.py --release"]).await;
    let test_id = tests_of_run(&pool, run_id).await[0].test_id;
    add_log(&pool, test_id, "stdout", 10, b"ok").await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/test/{}", test_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "pytest sanity/a.py");
    assert_eq!(body["cmd"], "pytest sanity/a.py --release");
    assert_eq!(body["run"]["id"], run_id);
    assert_eq!(body["logs"]["stdout"]["log"], "ok");
    assert_eq!(body["logs"]["stdout"]["type"], "stdout");
}
