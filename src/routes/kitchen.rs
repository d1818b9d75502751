use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::kitchen::DelayedOrderList,
    error::AppResult,
    middleware::auth::AuthStaff,
    response::ApiResponse,
    services::kitchen_service,
    state::AppState,
    workflow::KitchenPlan,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plan", get(kitchen_plan))
        .route("/delays", get(delayed_orders))
}

#[utoipa::path(
    get,
    path = "/api/kitchen/plan",
    responses(
        (status = 200, description = "Queue, parallel batches, station load and bottlenecks", body = ApiResponse<KitchenPlan>)
    ),
    tag = "Kitchen"
)]
pub async fn kitchen_plan(
    State(state): State<AppState>,
    staff: AuthStaff,
) -> AppResult<Json<ApiResponse<KitchenPlan>>> {
    Ok(Json(kitchen_service::kitchen_plan(&state, &staff).await?))
}

#[utoipa::path(
    get,
    path = "/api/kitchen/delays",
    responses(
        (status = 200, description = "Open orders past their estimate", body = ApiResponse<DelayedOrderList>)
    ),
    tag = "Kitchen"
)]
pub async fn delayed_orders(
    State(state): State<AppState>,
    staff: AuthStaff,
) -> AppResult<Json<ApiResponse<DelayedOrderList>>> {
    Ok(Json(kitchen_service::delayed_orders(&state, &staff).await?))
}
