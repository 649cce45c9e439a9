//! 商品管理 API 处理器
//!
//! 实现商品的列表、详情、新增、修改
//!
//! 提取器失败同样转换为 ItemError，保证响应格式统一

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{ApiResponse, CreateItemRequest, ItemDto, ItemSearchParams, UpdateItemRequest},
    error::ItemError,
    models::ItemSearchCond,
    state::AppState,
};

/// 商品列表
///
/// GET /api/items?itemName=&maxPrice=
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ItemSearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ItemDto>>>, ItemError> {
    let Query(params) = query?;
    let cond = ItemSearchCond::try_from(params)?;

    let items = state.item_service.find_items(&cond).await?;
    let dtos: Vec<ItemDto> = items.into_iter().map(ItemDto::from).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// 商品详情
///
/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<ItemDto>>, ItemError> {
    let Path(id) = path?;
    let item = state.item_service.get_item(id).await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// 新增商品
///
/// POST /api/items
///
/// 返回 201，Location 指向新商品详情
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<ItemDto>>,
    ),
    ItemError,
> {
    let Json(req) = payload?;
    req.validate()?;

    let saved = state.item_service.save(req.into()).await?;
    info!(item_id = saved.id, "Item created via API");

    let location = format!("/api/items/{}", saved.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success_with_message(saved.into(), "商品已保存")),
    ))
}

/// 修改商品
///
/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ItemDto>>, ItemError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    state.item_service.update(id, req.into()).await?;
    let item = state.item_service.get_item(id).await?;

    Ok(Json(ApiResponse::success(item.into())))
}
