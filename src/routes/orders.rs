use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        AssignCourierRequest, OrderDetail, OrderEventList, OrderList, PlaceOrderRequest,
        RecordPaymentRequest, SetPriorityRequest, UpdateStatusRequest,
    },
    error::AppResult,
    middleware::auth::AuthStaff,
    response::ApiResponse,
    routes::params::{DeliveryEstimateQuery, OrderListQuery},
    services::order_service,
    state::AppState,
    workflow::{DeliveryEstimate, Order},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(place_order))
        .route("/{id}", get(get_order))
        .route("/{id}/status", post(update_status))
        .route("/{id}/payments", post(record_payment))
        .route("/{id}/priority", post(set_priority))
        .route("/{id}/courier", post(assign_courier))
        .route("/{id}/delivery-estimate", post(delivery_estimate))
        .route("/{id}/events", get(order_events))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "List orders", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    staff: AuthStaff,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    Ok(Json(order_service::list_orders(&state, &staff, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<Order>),
        (status = 400, description = "Invalid order")
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    staff: AuthStaff,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let resp = order_service::place_order(&state, &staff, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with workflow insights", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    Ok(Json(order_service::get_order(&state, &staff, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Order>),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "Orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::update_status(&state, &staff, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/payments",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<Order>),
        (status = 422, description = "Payment rejected")
    ),
    tag = "Orders"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::record_payment(&state, &staff, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/priority",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = SetPriorityRequest,
    responses(
        (status = 200, description = "Priority updated", body = ApiResponse<Order>)
    ),
    tag = "Orders"
)]
pub async fn set_priority(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetPriorityRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::set_priority(&state, &staff, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/courier",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = AssignCourierRequest,
    responses(
        (status = 200, description = "Courier assigned", body = ApiResponse<Order>)
    ),
    tag = "Orders"
)]
pub async fn assign_courier(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignCourierRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::assign_courier(&state, &staff, id, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/delivery-estimate",
    params(
        ("id" = Uuid, Path, description = "Order ID"),
        DeliveryEstimateQuery
    ),
    responses(
        (status = 200, description = "Delivery estimate, stored on the order", body = ApiResponse<DeliveryEstimate>)
    ),
    tag = "Orders"
)]
pub async fn delivery_estimate(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
    Query(query): Query<DeliveryEstimateQuery>,
) -> AppResult<Json<ApiResponse<DeliveryEstimate>>> {
    Ok(Json(
        order_service::delivery_estimate(&state, &staff, id, query.distance_km).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}/events",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Audit trail", body = ApiResponse<OrderEventList>)
    ),
    tag = "Orders"
)]
pub async fn order_events(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderEventList>>> {
    Ok(Json(order_service::order_events(&state, &staff, id).await?))
}
