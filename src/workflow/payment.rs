//! Payment rules per order type: which methods are accepted, when the
//! customer pays, and how much has to be collected up front.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::model::{Order, OrderType, PaymentMethod, PaymentStatus};
use crate::error::WorkflowError;

/// Smallest delivery order accepted, in minor units.
pub const MIN_DELIVERY_TOTAL: i64 = 50_00;
/// Delivery orders above this total need a deposit.
pub const DEPOSIT_THRESHOLD: i64 = 300_00;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaymentStrategy {
    pub requires_upfront_payment: bool,
    pub allows_cash_on_delivery: bool,
    pub allows_table_payment: bool,
    pub preferred_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTiming {
    BeforePreparation,
    OnDelivery,
    AfterService,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaymentRequirements {
    pub must_pay_now: bool,
    pub can_pay_later: bool,
    pub suggested_timing: PaymentTiming,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MinimumPayment {
    pub minimum_amount: i64,
    pub requires_deposit: bool,
    pub deposit_amount: Option<i64>,
    pub below_minimum: bool,
    pub reason: String,
}

pub fn payment_strategy(order_type: OrderType) -> PaymentStrategy {
    match order_type {
        OrderType::DineIn => PaymentStrategy {
            requires_upfront_payment: false,
            allows_cash_on_delivery: false,
            allows_table_payment: true,
            preferred_methods: vec![PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::MealCard],
        },
        OrderType::Takeaway => PaymentStrategy {
            requires_upfront_payment: true,
            allows_cash_on_delivery: false,
            allows_table_payment: false,
            preferred_methods: vec![PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Online],
        },
        OrderType::Delivery => PaymentStrategy {
            requires_upfront_payment: false,
            allows_cash_on_delivery: true,
            allows_table_payment: false,
            preferred_methods: vec![PaymentMethod::Cash, PaymentMethod::Online],
        },
    }
}

pub fn payment_requirements(order: &Order) -> PaymentRequirements {
    match order.order_type {
        OrderType::Takeaway => PaymentRequirements {
            must_pay_now: true,
            can_pay_later: false,
            suggested_timing: PaymentTiming::BeforePreparation,
            reason: "Takeaway orders are paid before preparation starts".into(),
        },
        OrderType::Delivery => PaymentRequirements {
            must_pay_now: false,
            can_pay_later: true,
            suggested_timing: PaymentTiming::OnDelivery,
            reason: "Delivery orders are paid to the courier at the door or online".into(),
        },
        OrderType::DineIn => PaymentRequirements {
            must_pay_now: false,
            can_pay_later: true,
            suggested_timing: PaymentTiming::AfterService,
            reason: "Dine-in orders are paid at the table after service".into(),
        },
    }
}

pub fn minimum_payment(order: &Order) -> MinimumPayment {
    if order.order_type == OrderType::Delivery {
        if order.total < MIN_DELIVERY_TOTAL {
            return MinimumPayment {
                minimum_amount: MIN_DELIVERY_TOTAL,
                requires_deposit: false,
                deposit_amount: None,
                below_minimum: true,
                reason: format!(
                    "Delivery orders must total at least {}",
                    format_amount(MIN_DELIVERY_TOTAL)
                ),
            };
        }
        if order.total > DEPOSIT_THRESHOLD {
            // half, rounded up to the minor unit
            let deposit = (order.total + 1) / 2;
            return MinimumPayment {
                minimum_amount: deposit,
                requires_deposit: true,
                deposit_amount: Some(deposit),
                below_minimum: false,
                reason: format!(
                    "Delivery orders above {} require a 50% deposit",
                    format_amount(DEPOSIT_THRESHOLD)
                ),
            };
        }
    }

    MinimumPayment {
        minimum_amount: order.total,
        requires_deposit: false,
        deposit_amount: None,
        below_minimum: false,
        reason: "Full payment".into(),
    }
}

/// Checks a payment attempt against the order's payment rules.
pub fn validate_payment(
    order: &Order,
    method: PaymentMethod,
    amount: i64,
) -> Result<(), WorkflowError> {
    let reject = |reason: String| Err(WorkflowError::PaymentRejected(reason));

    if amount <= 0 {
        return reject("Payment amount must be greater than 0".into());
    }
    if order.status.is_terminal() {
        return reject(format!("Order is {} and cannot take payments", order.status));
    }
    if matches!(order.payment_status, PaymentStatus::Paid | PaymentStatus::Refunded) {
        return reject(format!("Order payment is already {}", order.payment_status));
    }

    let strategy = payment_strategy(order.order_type);
    if !strategy.preferred_methods.contains(&method) {
        return reject(format!(
            "{} is not accepted for {} orders",
            method, order.order_type
        ));
    }

    let requirements = payment_requirements(order);
    if requirements.must_pay_now && order.payment_status != PaymentStatus::Pending {
        return reject(format!(
            "{} orders take a single upfront payment; payment is already {}",
            order.order_type, order.payment_status
        ));
    }

    if order.payment_status == PaymentStatus::Pending {
        let minimum = minimum_payment(order);
        if minimum.below_minimum {
            return reject(minimum.reason);
        }
        if amount < minimum.minimum_amount {
            return reject(format!(
                "Payment of {} is below the minimum of {}: {}",
                format_amount(amount),
                format_amount(minimum.minimum_amount),
                minimum.reason
            ));
        }
    }

    Ok(())
}

/// Validates and records a payment. Overpayment (cash change) is not
/// stored; `paid_amount` never exceeds the total.
pub fn apply_payment(
    order: &mut Order,
    method: PaymentMethod,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    validate_payment(order, method, amount)?;

    order.paid_amount = (order.paid_amount + amount).min(order.total);
    order.payment_method = Some(method);
    order.payment_status = if order.paid_amount >= order.total {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };
    order.updated_at = now;

    Ok(())
}

pub fn format_amount(minor: i64) -> String {
    format!("{}.{:02}", minor / 100, (minor % 100).abs())
}
