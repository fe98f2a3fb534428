mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use shorty::api::dto::visit::VisitResponse;
use shorty::routes::router;
use shorty::state::AppState;

fn make_server(state: AppState) -> TestServer {
    let app = router(state).layer(common::MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "exmpl", "https://example.com/target").await;
    let server = make_server(common::create_test_state(pool));

    let response = server.get("/r/exmpl").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_records_visit(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "track", "https://example.com").await;
    let server = make_server(common::create_test_state(pool.clone()));

    server
        .get("/r/track")
        .add_header("User-Agent", "integration-test/1.0")
        .add_header("Referer", "https://news.example.org/")
        .await
        .assert_status(StatusCode::FOUND);

    let (visit_link, ip, user_agent, referer, status): (i64, String, String, String, i32) =
        sqlx::query_as("SELECT link_id, ip, user_agent, referer, status FROM link_visits")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(visit_link, link_id);
    assert_eq!(ip, "172.18.0.1");
    assert_eq!(user_agent, "integration-test/1.0");
    assert_eq!(referer, "https://news.example.org/");
    assert_eq!(status, 302);
}

#[sqlx::test]
async fn test_redirect_trims_short_name(pool: PgPool) {
    common::create_test_link(&pool, "padded", "https://example.com").await;
    let server = make_server(common::create_test_state(pool));

    let response = server.get("/r/%20padded%20").await;

    response.assert_status(StatusCode::FOUND);
}

#[sqlx::test]
async fn test_redirect_unknown_short_name(pool: PgPool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server.get("/r/missing").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>(), json!({ "error": "not found" }));
    assert_eq!(common::count_rows(&pool, "link_visits").await, 0);
}

#[sqlx::test]
async fn test_redirect_blank_short_name(pool: PgPool) {
    let server = make_server(common::create_test_state(pool));

    server.get("/r/%20%20").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_behind_proxy_uses_forwarded_for(pool: PgPool) {
    common::create_test_link(&pool, "proxied", "https://example.com").await;
    let server = make_server(common::create_test_state_with(pool.clone(), true));

    server
        .get("/r/proxied")
        .add_header("X-Forwarded-For", "203.0.113.9, 10.0.0.2")
        .await
        .assert_status(StatusCode::FOUND);

    let ip: String = sqlx::query_scalar("SELECT ip FROM link_visits")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(ip, "203.0.113.9");
}

#[sqlx::test]
async fn test_redirect_ignores_forwarded_for_without_proxy(pool: PgPool) {
    common::create_test_link(&pool, "direct", "https://example.com").await;
    let server = make_server(common::create_test_state(pool.clone()));

    server
        .get("/r/direct")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .await
        .assert_status(StatusCode::FOUND);

    let ip: String = sqlx::query_scalar("SELECT ip FROM link_visits")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(ip, "172.18.0.1");
}

#[sqlx::test]
async fn test_redirect_survives_visit_failure(pool: PgPool) {
    common::create_test_link(&pool, "fragile", "https://example.com").await;
    sqlx::query("DROP TABLE link_visits")
        .execute(&pool)
        .await
        .unwrap();

    let server = make_server(common::create_test_state(pool));

    let response = server.get("/r/fragile").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com");
}

#[sqlx::test]
async fn test_redirect_unusable_target_records_no_visit(pool: PgPool) {
    common::create_test_link(&pool, "nlx", "https://exa\nmple.com/p").await;
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server.get("/r/nlx").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.maybe_header("location").is_none());
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "internal server error" })
    );
    assert_eq!(common::count_rows(&pool, "link_visits").await, 0);
}

// ─── GET /api/link_visits ────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_visits_window(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "busy", "https://example.com").await;
    for i in 0..12 {
        common::create_test_visit(&pool, link_id, &format!("10.0.0.{i}")).await;
    }
    let server = make_server(common::create_test_state(pool));

    let response = server
        .get("/api/link_visits")
        .add_query_param("range", "[0,10]")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-range"), "link_visits 0-9/12");

    let visits = response.json::<Vec<VisitResponse>>();
    assert_eq!(visits.len(), 10);
    assert!(visits.windows(2).all(|w| w[0].id < w[1].id));
    assert!(visits.iter().all(|v| v.link_id == link_id && v.status == 302));
}

#[sqlx::test]
async fn test_list_visits_shape(pool: PgPool) {
    let server = make_server(common::create_test_state(pool.clone()));
    common::create_test_link(&pool, "shape", "https://example.com").await;

    server.get("/r/shape").await.assert_status(StatusCode::FOUND);

    let response = server.get("/api/link_visits").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-range"), "link_visits 0-0/1");

    let body = response.json::<Value>();
    let visit = body[0].as_object().unwrap();
    let mut keys: Vec<_> = visit.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["created_at", "id", "ip", "link_id", "status", "user_agent"]
    );
}

#[sqlx::test]
async fn test_list_visits_empty(pool: PgPool) {
    let server = make_server(common::create_test_state(pool));

    let response = server.get("/api/link_visits").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-range"), "link_visits */0");
}

#[sqlx::test]
async fn test_list_visits_invalid_range(pool: PgPool) {
    let server = make_server(common::create_test_state(pool));

    let response = server
        .get("/api/link_visits")
        .add_header("Range", "[3,1]")
        .await;

    response.assert_status_bad_request();
}
