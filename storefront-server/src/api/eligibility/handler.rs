//! 配送资格评估 API 处理器

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use storefront_shared::models::{OrderContext, ShippingDecision};

#[derive(Debug, Deserialize)]
pub struct EvaluateQuery {
    /// 评估时间 (RFC 3339)，默认为当前时间
    pub at: Option<DateTime<Utc>>,
}

/// POST /api/shipping/evaluate - 评估订单配送资格
pub async fn evaluate(
    State(state): State<ServerState>,
    query: Result<Query<EvaluateQuery>, QueryRejection>,
    ctx: Result<Json<OrderContext>, JsonRejection>,
) -> AppResult<Json<ShippingDecision>> {
    let Query(query) = query?;
    let Json(ctx) = ctx?;
    let registry = state.zones().registry();
    let rules = state.rules().find_active();
    let now = query.at.unwrap_or_else(Utc::now);

    let decision = state.evaluator.evaluate(&registry, &rules, &ctx, now)?;

    tracing::debug!(
        state_code = %ctx.state_code,
        allowed = decision.allowed,
        applied_rules = decision.applied_rules.len(),
        "Shipping eligibility evaluated"
    );
    Ok(Json(decision))
}
