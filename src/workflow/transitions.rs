//! Order status state machine.
//!
//! Which statuses an order may move to depends only on its current status,
//! its order type and whether it has been paid in full.

use chrono::{DateTime, Utc};

use super::model::{Order, OrderStatus, OrderType, PaymentStatus};
use crate::error::WorkflowError;

/// Legal targets for an order in its current state, in display order.
pub fn next_possible_statuses(order: &Order) -> Vec<OrderStatus> {
    next_statuses(order.status, order.order_type, order.payment_status)
}

pub fn next_statuses(
    status: OrderStatus,
    order_type: OrderType,
    payment_status: PaymentStatus,
) -> Vec<OrderStatus> {
    use OrderStatus::*;

    let paid = payment_status == PaymentStatus::Paid;
    let dine_in = order_type == OrderType::DineIn;

    match status {
        PendingConfirmation => vec![Confirmed, Cancelled],
        Confirmed if dine_in => vec![Preparing, Cancelled],
        Confirmed => vec![Preparing, ReadyForPayment, Cancelled],
        ReadyForPayment if paid => vec![Preparing],
        ReadyForPayment => vec![Cancelled],
        Preparing => vec![ReadyForService, Cancelled],
        ReadyForService => match order_type {
            OrderType::DineIn => vec![Served, ReadyForPayment],
            OrderType::Delivery => vec![OutForDelivery, Cancelled],
            OrderType::Takeaway => vec![Completed],
        },
        OutForDelivery if !dine_in => vec![Completed, Cancelled],
        Served if dine_in && paid => vec![Completed],
        Served if dine_in => vec![ReadyForPayment],
        Paid => vec![Completed],
        OutForDelivery | Served | Completed | Cancelled => Vec::new(),
    }
}

/// Structural check that ignores payment: `to` is reachable from `from` for
/// this order type once the order is (or is not yet) paid.
pub fn is_valid_transition(from: OrderStatus, to: OrderStatus, order_type: OrderType) -> bool {
    [PaymentStatus::Pending, PaymentStatus::Paid]
        .into_iter()
        .any(|payment| next_statuses(from, order_type, payment).contains(&to))
}

impl Order {
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        next_possible_statuses(self).contains(&to)
    }
}

/// Moves `order` to `to`, stamping the matching stage timestamp.
/// On rejection the order is left exactly as it was.
pub fn apply_transition(
    order: &mut Order,
    to: OrderStatus,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    if !order.can_transition_to(to) {
        return Err(WorkflowError::IllegalTransition {
            from: order.status,
            to,
            order_type: order.order_type,
        });
    }

    order.status = to;
    order.updated_at = now;
    match to {
        OrderStatus::Confirmed => order.confirmed_at = Some(now),
        OrderStatus::ReadyForService => order.prepared_at = Some(now),
        OrderStatus::Served => order.served_at = Some(now),
        OrderStatus::Completed => order.completed_at = Some(now),
        _ => {}
    }

    Ok(())
}
