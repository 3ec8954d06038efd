//! 配送资格评估 API 模块
//!
//! 管理端预览与结账流程共用: 按已存储的区域和规则评估订单上下文。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/shipping/evaluate", post(handler::evaluate))
}
