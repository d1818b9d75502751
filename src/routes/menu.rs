use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::menu::{CreateFoodItemRequest, MenuList, UpdateFoodItemRequest},
    error::AppResult,
    middleware::auth::AuthStaff,
    response::ApiResponse,
    services::menu_service,
    state::AppState,
    workflow::FoodItem,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu).post(create_menu_item))
        .route("/{id}", put(update_menu_item))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Menu items", body = ApiResponse<MenuList>)
    ),
    security(()),
    tag = "Menu"
)]
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<ApiResponse<MenuList>>> {
    Ok(Json(menu_service::list_menu(&state).await?))
}

#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = CreateFoodItemRequest,
    responses(
        (status = 201, description = "Create menu item", body = ApiResponse<FoodItem>),
        (status = 403, description = "Admin only")
    ),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    staff: AuthStaff,
    Json(payload): Json<CreateFoodItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FoodItem>>)> {
    let resp = menu_service::create_menu_item(&state, &staff, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    params(
        ("id" = Uuid, Path, description = "Menu item ID")
    ),
    request_body = UpdateFoodItemRequest,
    responses(
        (status = 200, description = "Update menu item", body = ApiResponse<FoodItem>),
        (status = 404, description = "Menu item not found")
    ),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    staff: AuthStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFoodItemRequest>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    Ok(Json(
        menu_service::update_menu_item(&state, &staff, id, payload).await?,
    ))
}
