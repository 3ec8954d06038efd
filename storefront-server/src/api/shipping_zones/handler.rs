//! 配送区域 API 处理器

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::audit_log;
use crate::core::ServerState;
use crate::utils::AppResult;
use storefront_shared::models::{ShippingZone, ShippingZoneUpsert};

const RESOURCE: &str = "shipping_zone";

/// GET /api/shipping-zones - 获取全部 50 个州的配送区域
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ShippingZone>>> {
    Ok(Json(state.zones().registry().list()))
}

/// GET /api/shipping-zones/{state_code} - 获取单个州的配送区域
pub async fn get_by_state(
    State(state): State<ServerState>,
    Path(state_code): Path<String>,
) -> AppResult<Json<ShippingZone>> {
    let zone = state.zones().registry().lookup(&state_code)?;
    Ok(Json(zone))
}

/// PUT /api/shipping-zones/{state_code} - 创建或替换区域覆盖
pub async fn upsert(
    State(state): State<ServerState>,
    Path(state_code): Path<String>,
    payload: Result<Json<ShippingZoneUpsert>, JsonRejection>,
) -> AppResult<Json<ShippingZone>> {
    let Json(payload) = payload?;
    let zone = state.zones().upsert(&state_code, payload).await?;

    audit_log!(
        "upsert",
        format!("{}:{}", RESOURCE, zone.state_code),
        format!("{:?}", zone.status)
    );
    Ok(Json(zone))
}

/// DELETE /api/shipping-zones/{state_code} - 删除区域覆盖 (恢复默认)
pub async fn delete(
    State(state): State<ServerState>,
    Path(state_code): Path<String>,
) -> AppResult<Json<bool>> {
    state.zones().delete(&state_code).await?;

    audit_log!("delete", format!("{}:{}", RESOURCE, state_code.trim().to_uppercase()));
    Ok(Json(true))
}
