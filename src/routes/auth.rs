use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterStaffRequest},
    error::AppResult,
    middleware::auth::AuthStaff,
    models::Staff,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/staff", post(register_staff))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login staff member", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    security(()),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/staff",
    request_body = RegisterStaffRequest,
    responses(
        (status = 201, description = "Register staff member", body = ApiResponse<Staff>),
        (status = 403, description = "Admin only")
    ),
    tag = "Auth"
)]
pub async fn register_staff(
    State(state): State<AppState>,
    staff: AuthStaff,
    Json(payload): Json<RegisterStaffRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Staff>>)> {
    let resp = auth_service::register_staff(&state, &staff, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
