//! 配送规则 API 处理器

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::audit_log;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use storefront_shared::models::{ShippingRuleCreate, ShippingRuleUpdate, ShippingZoneRule};

const RESOURCE: &str = "shipping_rule";

/// GET /api/shipping-rules - 获取所有配送规则 (按优先级排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ShippingZoneRule>>> {
    Ok(Json(state.rules().find_all()))
}

/// GET /api/shipping-rules/{id} - 获取单个配送规则
pub async fn get_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ShippingZoneRule>> {
    let Path(id) = id?;
    let rule = state
        .rules()
        .find_by_id(id)
        .ok_or_else(|| AppError::rule_not_found(id))?;
    Ok(Json(rule))
}

/// POST /api/shipping-rules - 创建配送规则
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ShippingRuleCreate>, JsonRejection>,
) -> AppResult<Json<ShippingZoneRule>> {
    let Json(payload) = payload?;
    let rule = state.rules().create(payload).await?;

    audit_log!("create", format!("{}:{}", RESOURCE, rule.id), &rule.name);
    Ok(Json(rule))
}

/// PUT /api/shipping-rules/{id} - 更新配送规则
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ShippingRuleUpdate>, JsonRejection>,
) -> AppResult<Json<ShippingZoneRule>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let rule = state.rules().update(id, payload).await?;

    audit_log!("update", format!("{}:{}", RESOURCE, id), &rule.name);
    Ok(Json(rule))
}

/// DELETE /api/shipping-rules/{id} - 删除配送规则
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<bool>> {
    let Path(id) = id?;
    state.rules().delete(id).await?;

    audit_log!("delete", format!("{}:{}", RESOURCE, id));
    Ok(Json(true))
}
