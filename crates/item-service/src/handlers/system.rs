//! 首页跳转与健康检查

use axum::{Json, extract::State, http::StatusCode, response::Redirect};

use crate::state::AppState;

const SERVICE_NAME: &str = "item-service";

/// 首页跳转到商品列表
///
/// GET /
pub async fn home() -> Redirect {
    Redirect::to("/api/items")
}

/// 存活探针：服务进程正常即返回 ok
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：SQL 仓储模式下检查数据库连接
///
/// 失败时返回 503，负载均衡据此摘除实例
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let database = match &state.database {
        Some(db) => {
            if db.health_check().await.is_ok() {
                "ok"
            } else {
                "fail"
            }
        }
        None => "skipped",
    };
    let ready = database != "fail";

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if ready { "ok" } else { "degraded" },
            "service": SERVICE_NAME,
            "checks": {
                "database": database
            }
        })),
    )
}
