use chrono::{DateTime, Utc};

use super::model::{Order, OrderPriority, OrderType};

/// Orders above this total (minor units) are handled with high priority.
pub const HIGH_VALUE_TOTAL: i64 = 200_00;

pub fn calculate_order_priority(order: &Order, now: DateTime<Utc>) -> OrderPriority {
    let age = order.age_minutes(now);
    if age > 45 {
        OrderPriority::Urgent
    } else if age > 30 || order.order_type == OrderType::Delivery || order.total > HIGH_VALUE_TOTAL
    {
        OrderPriority::High
    } else {
        OrderPriority::Normal
    }
}

/// Automatic recalculation only ever raises the priority.
pub fn escalated_priority(order: &Order, now: DateTime<Utc>) -> OrderPriority {
    let calculated = calculate_order_priority(order, now);
    if calculated.rank() > order.priority.rank() {
        calculated
    } else {
        order.priority
    }
}
