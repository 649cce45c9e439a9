//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射和全局中间件

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use itemservice_shared::config::ServerConfig;
use itemservice_shared::observability::middleware as obs_middleware;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::{error::ItemError, handlers, state::AppState};

/// 构建商品管理路由
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::item::list_items).post(handlers::item::create_item),
        )
        .route(
            "/items/{id}",
            get(handlers::item::get_item).put(handlers::item::update_item),
        )
}

/// 构建完整的 API 路由（不含前缀）
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(item_routes())
}

/// 根据配置构建 CORS 层
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", allowed_origins);
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 超时层返回的 408 没有响应体，替换为统一错误响应
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ItemError::Timeout.into_response();
    }
    response
}

/// 构建带全部中间件的应用
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::system::home))
        .nest("/api", api_routes())
        .route("/health", get(handlers::system::health_check))
        .route("/ready", get(handlers::system::readiness_check))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(middleware::map_response(timeout_envelope))
        .layer(middleware::from_fn(obs_middleware::security_headers))
        .layer(cors_layer(&server.cors_origins))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_timeout_is_wrapped_in_envelope() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "done"
                }),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(10),
            ))
            .layer(middleware::map_response(timeout_envelope));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
    }

    #[tokio::test]
    async fn test_timeout_envelope_leaves_other_responses() {
        let response = timeout_envelope((StatusCode::OK, "fine").into_response()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }

    #[test]
    fn test_cors_layer_accepts_wildcard_and_lists() {
        let _any = cors_layer("*");
        let _list = cors_layer("http://localhost:3000, http://localhost:5173");
    }
}
