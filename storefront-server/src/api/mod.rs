//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`shipping_zones`] - 配送区域管理接口
//! - [`shipping_rules`] - 配送规则管理接口
//! - [`eligibility`] - 配送资格评估接口

pub mod eligibility;
pub mod health;
pub mod shipping_rules;
pub mod shipping_zones;

use axum::Router;
use axum::http::Uri;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::utils::AppError;

/// 构建完整的应用路由 (状态 + 中间件)
pub fn build_app(state: ServerState) -> Router {
    health::mark_start();
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .merge(health::router())
        .merge(shipping_zones::router())
        .merge(shipping_rules::router())
        .merge(eligibility::router())
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 未匹配的路径返回 JSON 错误体
async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(uri.path())
}
