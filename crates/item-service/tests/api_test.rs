//! HTTP 接口测试
//!
//! 通过 tower::ServiceExt::oneshot 直接驱动完整路由（含中间件），不监听端口。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use item_service::{
    ItemRepositoryTrait, MIGRATOR, MemoryItemRepository, SqlItemRepository, routes, seed,
    state::AppState,
};
use itemservice_shared::config::{DatabaseConfig, ServerConfig};
use itemservice_shared::database::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

// ==================== 辅助函数 ====================

/// 使用内存仓储并写入示例商品（itemA, itemB）
async fn seeded_app() -> Router {
    let repo = Arc::new(MemoryItemRepository::new());
    seed::init_test_data(repo.as_ref()).await.unwrap();
    let repository: Arc<dyn ItemRepositoryTrait> = repo;
    routes::build_app(AppState::new(repository, None), &ServerConfig::default())
}

async fn sql_app() -> Router {
    let db = Database::connect(&DatabaseConfig::default()).await.unwrap();
    db.run_migrations(&MIGRATOR).await.unwrap();
    let repository: Arc<dyn ItemRepositoryTrait> =
        Arc::new(SqlItemRepository::new(db.pool().clone()));
    routes::build_app(AppState::new(repository, Some(db)), &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["itemName"].as_str().unwrap().to_string())
        .collect()
}

// ==================== 列表与搜索 ====================

#[tokio::test]
async fn list_returns_seeded_items() {
    let app = seeded_app().await;
    let (status, _, body) = send(&app, get("/api/items")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(names(&body), vec!["itemA", "itemB"]);
}

#[tokio::test]
async fn list_filters_by_name_and_price() {
    let app = seeded_app().await;

    let (_, _, body) = send(&app, get("/api/items?itemName=B")).await;
    assert_eq!(names(&body), vec!["itemB"]);

    let (_, _, body) = send(&app, get("/api/items?maxPrice=15000")).await;
    assert_eq!(names(&body), vec!["itemA"]);

    let (_, _, body) = send(&app, get("/api/items?itemName=item&maxPrice=20000")).await;
    assert_eq!(names(&body), vec!["itemA", "itemB"]);
}

#[tokio::test]
async fn list_treats_empty_form_fields_as_absent() {
    let app = seeded_app().await;
    let (status, _, body) = send(&app, get("/api/items?itemName=&maxPrice=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["itemA", "itemB"]);
}

#[tokio::test]
async fn list_rejects_non_numeric_max_price() {
    let app = seeded_app().await;
    let (status, _, body) = send(&app, get("/api/items?maxPrice=cheap")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ==================== 详情 ====================

#[tokio::test]
async fn get_item_by_id() {
    let app = seeded_app().await;
    let (status, _, body) = send(&app, get("/api/items/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["itemName"], "itemA");
    assert_eq!(body["data"]["price"], 10000);
    assert_eq!(body["data"]["quantity"], 10);
}

#[tokio::test]
async fn get_missing_item_is_404() {
    let app = seeded_app().await;
    let (status, _, body) = send(&app, get("/api/items/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}

// ==================== 新增 ====================

#[tokio::test]
async fn create_item_returns_location() {
    let app = seeded_app().await;
    let (status, headers, body) = send(
        &app,
        json_request(
            "POST",
            "/api/items",
            json!({"itemName": "itemC", "price": 3000, "quantity": 3}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(headers[header::LOCATION], "/api/items/3");

    let (status, _, body) = send(&app, get("/api/items/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["itemName"], "itemC");
}

#[tokio::test]
async fn create_item_validates_input() {
    let app = seeded_app().await;
    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/items",
            json!({"itemName": "much-too-long-name", "price": 1, "quantity": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, _, body) = send(&app, get("/api/items")).await;
    assert_eq!(names(&body).len(), 2);
}

#[tokio::test]
async fn create_item_with_malformed_body_keeps_envelope() {
    let app = seeded_app().await;

    // 缺少 quantity
    let (status, _, body) = send(
        &app,
        json_request("POST", "/api/items", json!({"itemName": "a", "price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // 价格超出 i32 范围
    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/items",
            json!({"itemName": "a", "price": 3_000_000_000_i64, "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // 不是 JSON
    let request = Request::builder()
        .method("POST")
        .uri("/api/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, _, body) = send(&app, get("/api/items")).await;
    assert_eq!(names(&body).len(), 2);
}

#[tokio::test]
async fn non_numeric_id_keeps_envelope() {
    let app = seeded_app().await;

    let (status, _, body) = send(&app, get("/api/items/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/items/abc",
            json!({"itemName": "x", "price": 1, "quantity": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ==================== 修改 ====================

#[tokio::test]
async fn update_item_replaces_fields() {
    let app = seeded_app().await;
    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/items/2",
            json!({"itemName": "itemB2", "price": 25000, "quantity": 5}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["itemName"], "itemB2");
    assert_eq!(body["data"]["price"], 25000);
    assert_eq!(body["data"]["quantity"], 5);
}

#[tokio::test]
async fn update_missing_item_is_404() {
    let app = seeded_app().await;
    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/items/77",
            json!({"itemName": "x", "price": 1, "quantity": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn update_rejects_negative_quantity() {
    let app = seeded_app().await;
    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/items/1",
            json!({"itemName": "itemA", "price": 1, "quantity": -5}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ==================== SQL 仓储端到端 ====================

#[tokio::test]
async fn sql_backend_create_update_search() {
    let app = sql_app().await;

    let (status, _, created) = send(
        &app,
        json_request(
            "POST",
            "/api/items",
            json!({"itemName": "pen", "price": 500, "quantity": 100}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/items/{id}"),
            json!({"itemName": "pencil", "price": 300, "quantity": 90}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, get("/api/items?itemName=cil&maxPrice=300")).await;
    assert_eq!(names(&body), vec!["pencil"]);
}

// ==================== 系统端点与中间件 ====================

#[tokio::test]
async fn home_redirects_to_item_list() {
    let app = seeded_app().await;
    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/api/items");
}

#[tokio::test]
async fn health_and_ready() {
    let app = seeded_app().await;

    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "skipped");

    let sql = sql_app().await;
    let (status, _, body) = send(&sql, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "ok");
}

#[tokio::test]
async fn request_id_is_echoed_and_generated() {
    let app = seeded_app().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(&app, request).await;
    assert_eq!(headers["x-request-id"], "req-42");

    let (_, headers, _) = send(&app, get("/health")).await;
    assert!(!headers["x-request-id"].is_empty());
    assert_eq!(headers["x-content-type-options"], "nosniff");
}
