use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{OrderFilter, OrderStore};
use crate::{
    error::{AppError, AppResult},
    models::{OrderEvent, Staff},
    routes::params::SortOrder,
    workflow::{FoodCategory, FoodItem, Order, OrderStatus},
};

/// In-process store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<Uuid, Order>>,
    events: RwLock<Vec<OrderEvent>>,
    menu: RwLock<HashMap<Uuid, FoodItem>>,
    staff: RwLock<HashMap<Uuid, Staff>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a small demo menu.
    pub fn with_demo_menu() -> Self {
        let now = Utc::now();
        let demo = [
            ("Margherita Pizza", FoodCategory::Pizza, 185_00),
            ("Classic Burger", FoodCategory::Burger, 165_00),
            ("Adana Kebab", FoodCategory::Meat, 240_00),
            ("Crispy Chicken Wings", FoodCategory::Chicken, 150_00),
            ("Shepherd Salad", FoodCategory::Salad, 70_00),
            ("Lentil Soup", FoodCategory::Other, 60_00),
            ("Baklava", FoodCategory::Dessert, 90_00),
            ("Ayran", FoodCategory::Drink, 25_00),
        ];

        let menu = demo
            .into_iter()
            .map(|(name, category, price)| {
                let item = FoodItem {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    description: None,
                    category,
                    price,
                    available: true,
                    created_at: now,
                };
                (item.id, item)
            })
            .collect();

        Self {
            menu: RwLock::new(menu),
            ..Self::default()
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders(&self, filter: &OrderFilter) -> AppResult<(Vec<Order>, u64)> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| filter.order_type.is_none_or(|t| o.order_type == t))
            .cloned()
            .collect();

        matching.sort_by_key(|o| (o.created_at, o.order_number));
        if filter.sort_order == SortOrder::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn orders_in_status(&self, statuses: &[OrderStatus]) -> AppResult<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| statuses.contains(&o.status))
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn save_order(&self, order: &Order) -> AppResult<()> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(existing) => {
                let items = std::mem::take(&mut existing.items);
                *existing = Order {
                    items,
                    ..order.clone()
                };
            }
            None => {
                orders.insert(order.id, order.clone());
            }
        }
        Ok(())
    }

    async fn max_order_number(&self) -> AppResult<i64> {
        let orders = self.orders.read().await;
        Ok(orders.values().map(|o| o.order_number).max().unwrap_or(0))
    }

    async fn record_event(&self, event: &OrderEvent) -> AppResult<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn order_events(&self, order_id: Uuid) -> AppResult<Vec<OrderEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn list_food_items(&self) -> AppResult<Vec<FoodItem>> {
        let menu = self.menu.read().await;
        let mut items: Vec<FoodItem> = menu.values().cloned().collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn food_items_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<FoodItem>> {
        let menu = self.menu.read().await;
        Ok(ids.iter().filter_map(|id| menu.get(id).cloned()).collect())
    }

    async fn save_food_item(&self, item: &FoodItem) -> AppResult<()> {
        self.menu.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_staff_by_email(&self, email: &str) -> AppResult<Option<Staff>> {
        let staff = self.staff.read().await;
        Ok(staff
            .values()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_staff(&self, id: Uuid) -> AppResult<Option<Staff>> {
        Ok(self.staff.read().await.get(&id).cloned())
    }

    async fn insert_staff(&self, staff: &Staff) -> AppResult<()> {
        let mut all = self.staff.write().await;
        if all.values().any(|s| s.email.eq_ignore_ascii_case(&staff.email)) {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }
        all.insert(staff.id, staff.clone());
        Ok(())
    }
}
