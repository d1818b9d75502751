use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::workflow::{DelayAnalysis, OrderStatus, OrderType};

#[derive(Debug, Serialize, ToSchema)]
pub struct DelayedOrder {
    pub order_id: Uuid,
    pub order_number: i64,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub delay: DelayAnalysis,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DelayedOrderList {
    pub items: Vec<DelayedOrder>,
}
