//! 配送区域 API 模块
//!
//! 区域按州代码寻址; 50 个州都有区域，无论是否存储了覆盖。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shipping-zones", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list)).route(
        "/{state_code}",
        get(handler::get_by_state)
            .put(handler::upsert)
            .delete(handler::delete),
    )
}
