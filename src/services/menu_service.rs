use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::menu::{CreateFoodItemRequest, MenuList, UpdateFoodItemRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthStaff, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
    workflow::FoodItem,
};

pub async fn list_menu(state: &AppState) -> AppResult<ApiResponse<MenuList>> {
    let items = state.store.list_food_items().await?;
    let total = items.len() as u64;
    Ok(ApiResponse::success(
        "Menu",
        MenuList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn create_menu_item(
    state: &AppState,
    staff: &AuthStaff,
    payload: CreateFoodItemRequest,
) -> AppResult<ApiResponse<FoodItem>> {
    ensure_admin(staff)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if payload.price <= 0 {
        return Err(AppError::BadRequest("Price must be greater than 0".into()));
    }

    let item = FoodItem {
        id: Uuid::new_v4(),
        name,
        description: payload.description,
        category: payload.category,
        price: payload.price,
        available: true,
        created_at: Utc::now(),
    };
    state.store.save_food_item(&item).await?;

    tracing::info!(food_item_id = %item.id, name = %item.name, "menu item created");
    Ok(ApiResponse::success("Menu item created", item, None))
}

pub async fn update_menu_item(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
    payload: UpdateFoodItemRequest,
) -> AppResult<ApiResponse<FoodItem>> {
    ensure_admin(staff)?;
    let mut item = state
        .store
        .food_items_by_ids(&[id])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".into()));
        }
        item.name = name;
    }
    if let Some(price) = payload.price {
        if price <= 0 {
            return Err(AppError::BadRequest("Price must be greater than 0".into()));
        }
        item.price = price;
    }
    if payload.description.is_some() {
        item.description = payload.description;
    }
    if let Some(category) = payload.category {
        item.category = category;
    }
    if let Some(available) = payload.available {
        item.available = available;
    }

    state.store.save_food_item(&item).await?;
    tracing::info!(food_item_id = %item.id, available = item.available, "menu item updated");
    Ok(ApiResponse::success("Menu item updated", item, None))
}
