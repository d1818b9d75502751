use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    routes::params::PricingQuery,
    state::AppState,
    workflow::{OrderType, PaymentStrategy, PricingSuggestion, dynamic_pricing_suggestion, payment_strategy},
};

pub fn strategy_for(order_type: OrderType) -> ApiResponse<PaymentStrategy> {
    ApiResponse::success(
        "Payment strategy",
        payment_strategy(order_type),
        Some(Meta::empty()),
    )
}

/// Advisory only; `at` is restaurant-local and defaults to now.
pub fn pricing_suggestion(
    state: &AppState,
    query: PricingQuery,
) -> AppResult<ApiResponse<PricingSuggestion>> {
    if query.total < 0 {
        return Err(AppError::BadRequest("total must not be negative".into()));
    }
    let at = query.at.unwrap_or_else(|| state.local_time(Utc::now()));
    Ok(ApiResponse::success(
        "Pricing suggestion",
        dynamic_pricing_suggestion(at, query.total),
        Some(Meta::empty()),
    ))
}
