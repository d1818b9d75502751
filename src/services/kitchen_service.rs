use chrono::Utc;

use crate::{
    dto::kitchen::{DelayedOrder, DelayedOrderList},
    error::AppResult,
    middleware::auth::{AuthStaff, ensure_any_role},
    models::StaffRole,
    response::{ApiResponse, Meta},
    state::AppState,
    workflow::{KitchenPlan, OrderStatus, analyze_delay, escalated_priority, kitchen_workflow_plan},
};

/// Plan for the orders currently in the kitchen. Priorities are escalated
/// for ordering only; nothing is written back.
pub async fn kitchen_plan(
    state: &AppState,
    staff: &AuthStaff,
) -> AppResult<ApiResponse<KitchenPlan>> {
    ensure_any_role(staff, &[StaffRole::Kitchen, StaffRole::Cashier])?;

    let now = Utc::now();
    let mut orders = state
        .store
        .orders_in_status(&[OrderStatus::Confirmed, OrderStatus::Preparing])
        .await?;
    for order in &mut orders {
        order.priority = escalated_priority(order, now);
    }

    let plan = kitchen_workflow_plan(&orders);
    if !plan.bottlenecks.is_empty() {
        tracing::warn!(
            bottlenecks = plan.bottlenecks.len(),
            orders = orders.len(),
            "kitchen bottleneck detected"
        );
    }
    Ok(ApiResponse::success("Kitchen plan", plan, Some(Meta::empty())))
}

/// Open orders running past their estimate, most delayed first.
pub async fn delayed_orders(
    state: &AppState,
    _staff: &AuthStaff,
) -> AppResult<ApiResponse<DelayedOrderList>> {
    let now = Utc::now();
    let open: Vec<OrderStatus> = OrderStatus::ALL
        .iter()
        .copied()
        .filter(|status| !status.is_terminal())
        .collect();

    let mut items: Vec<DelayedOrder> = state
        .store
        .orders_in_status(&open)
        .await?
        .into_iter()
        .filter_map(|order| {
            let delay = analyze_delay(&order, now);
            delay.is_delayed.then(|| DelayedOrder {
                order_id: order.id,
                order_number: order.order_number,
                status: order.status,
                order_type: order.order_type,
                delay,
            })
        })
        .collect();
    items.sort_by(|a, b| b.delay.delay_minutes.cmp(&a.delay.delay_minutes));

    let total = items.len() as u64;
    Ok(ApiResponse::success(
        "Delayed orders",
        DelayedOrderList { items },
        Some(Meta::new(1, total, total)),
    ))
}
