use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    error::AppResult,
    response::ApiResponse,
    routes::params::PricingQuery,
    services::pricing_service,
    state::AppState,
    workflow::{OrderType, PaymentStrategy, PricingSuggestion},
};

pub fn payments_router() -> Router<AppState> {
    Router::new().route("/strategy/{order_type}", get(payment_strategy))
}

pub fn pricing_router() -> Router<AppState> {
    Router::new().route("/suggestion", get(pricing_suggestion))
}

#[utoipa::path(
    get,
    path = "/api/payments/strategy/{order_type}",
    params(
        ("order_type" = OrderType, Path, description = "DINE_IN, TAKEAWAY or DELIVERY")
    ),
    responses(
        (status = 200, description = "Payment strategy", body = ApiResponse<PaymentStrategy>)
    ),
    security(()),
    tag = "Pricing"
)]
pub async fn payment_strategy(
    Path(order_type): Path<OrderType>,
) -> Json<ApiResponse<PaymentStrategy>> {
    Json(pricing_service::strategy_for(order_type))
}

#[utoipa::path(
    get,
    path = "/api/pricing/suggestion",
    params(PricingQuery),
    responses(
        (status = 200, description = "Advisory price adjustment", body = ApiResponse<PricingSuggestion>)
    ),
    security(()),
    tag = "Pricing"
)]
pub async fn pricing_suggestion(
    State(state): State<AppState>,
    Query(query): Query<PricingQuery>,
) -> AppResult<Json<ApiResponse<PricingSuggestion>>> {
    Ok(Json(pricing_service::pricing_suggestion(&state, query)?))
}
