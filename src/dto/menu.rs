use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::workflow::{FoodCategory, FoodItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFoodItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: FoodCategory,
    pub price: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFoodItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<FoodCategory>,
    pub price: Option<i64>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuList {
    pub items: Vec<FoodItem>,
}
