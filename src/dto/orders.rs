use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::OrderEvent,
    workflow::{
        ComplexityAnalysis, DelayAnalysis, MinimumPayment, Order, OrderPriority, OrderStatus,
        OrderType, PaymentMethod, PaymentRequirements, StationAssignment,
    },
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaceOrderItem {
    pub food_item_id: Uuid,
    #[schema(minimum = 1, maximum = 999)]
    pub quantity: u32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub order_type: OrderType,
    pub items: Vec<PlaceOrderItem>,
    pub table_id: Option<String>,
    pub table_name: Option<String>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub delivery_address: Option<String>,
    /// Courier distance for delivery orders; enables the delivery estimate.
    pub distance_km: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub method: PaymentMethod,
    /// Minor currency units
    pub amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPriorityRequest {
    pub priority: OrderPriority,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignCourierRequest {
    pub courier_id: Uuid,
}

/// Everything the workflow rules say about an order right now.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderInsights {
    pub next_statuses: Vec<OrderStatus>,
    pub delay: DelayAnalysis,
    pub complexity: ComplexityAnalysis,
    pub station: StationAssignment,
    pub payment_requirements: PaymentRequirements,
    pub minimum_payment: MinimumPayment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub insights: OrderInsights,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderEventList {
    pub items: Vec<OrderEvent>,
}
