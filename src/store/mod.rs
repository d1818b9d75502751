//! Storage behind the services. `PgStore` talks to Postgres, `MemoryStore`
//! keeps everything in process for demos and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{OrderEvent, Staff},
    routes::params::SortOrder,
    workflow::{FoodItem, Order, OrderStatus, OrderType},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub sort_order: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// A page of orders sorted by creation time, plus the total match count.
    async fn list_orders(&self, filter: &OrderFilter) -> AppResult<(Vec<Order>, u64)>;

    async fn orders_in_status(&self, statuses: &[OrderStatus]) -> AppResult<Vec<Order>>;

    async fn get_order(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// Inserts a new order with its items or updates an existing one.
    /// Items are written once, on insert.
    async fn save_order(&self, order: &Order) -> AppResult<()>;

    /// Highest order number handed out so far, 0 when empty.
    async fn max_order_number(&self) -> AppResult<i64>;

    async fn record_event(&self, event: &OrderEvent) -> AppResult<()>;

    async fn order_events(&self, order_id: Uuid) -> AppResult<Vec<OrderEvent>>;

    async fn list_food_items(&self) -> AppResult<Vec<FoodItem>>;

    async fn food_items_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<FoodItem>>;

    async fn save_food_item(&self, item: &FoodItem) -> AppResult<()>;

    async fn find_staff_by_email(&self, email: &str) -> AppResult<Option<Staff>>;

    async fn get_staff(&self, id: Uuid) -> AppResult<Option<Staff>>;

    async fn insert_staff(&self, staff: &Staff) -> AppResult<()>;
}
