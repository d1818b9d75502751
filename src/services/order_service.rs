use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::orders::{
        AssignCourierRequest, OrderDetail, OrderEventList, OrderInsights, OrderList,
        PlaceOrderRequest, RecordPaymentRequest, SetPriorityRequest, UpdateStatusRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthStaff, ensure_any_role},
    models::{OrderEvent, StaffRole},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
    store::OrderFilter,
    workflow::{
        CartItem, DeliveryEstimate, MAX_LINE_QUANTITY, Order, OrderStatus, OrderType,
        analyze_complexity, analyze_delay, apply_payment, apply_transition,
        assign_kitchen_station, calculate_order_priority, delivery_time_estimate,
        escalated_priority, estimated_preparation_minutes, minimum_payment,
        next_possible_statuses, payment_requirements,
    },
};

pub async fn place_order(
    state: &AppState,
    staff: &AuthStaff,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_any_role(staff, &[StaffRole::Cashier, StaffRole::Waiter])?;
    validate_placement(&payload)?;

    let items = build_cart(state, &payload).await?;
    let now = Utc::now();

    let mut order = Order::new(Uuid::new_v4(), 0, payload.order_type, items, now);
    order.table_id = non_blank(payload.table_id);
    order.table_name = non_blank(payload.table_name);
    order.customer_name = non_blank(payload.customer_name);
    order.notes = non_blank(payload.notes);
    order.delivery_address = non_blank(payload.delivery_address);

    let minimum = minimum_payment(&order);
    if minimum.below_minimum {
        return Err(AppError::BadRequest(minimum.reason));
    }

    order.priority = calculate_order_priority(&order, now);
    let ctx = state.estimate_context(now).await?;
    order.estimated_ready_time = Some(estimated_preparation_minutes(&order, &ctx).ready_time);
    if let (OrderType::Delivery, Some(distance_km)) = (order.order_type, payload.distance_km) {
        order.estimated_delivery_time =
            Some(delivery_time_estimate(&order, distance_km, &ctx).estimated_delivery_time);
    }

    order.order_number = state.sequence.next();
    state.store.save_order(&order).await?;

    tracing::info!(
        order_id = %order.id,
        order_number = order.order_number,
        order_type = %order.order_type,
        total = order.total,
        priority = %order.priority,
        "order placed"
    );
    record_event(
        state,
        OrderEvent::new(
            order.id,
            Some(staff.staff_id),
            "order_placed",
            json!({
                "order_number": order.order_number,
                "order_type": order.order_type,
                "total": order.total,
                "item_count": order.item_count(),
            }),
        ),
    )
    .await;

    Ok(ApiResponse::success("Order placed", order, Some(Meta::empty())))
}

pub async fn list_orders(
    state: &AppState,
    _staff: &AuthStaff,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let filter = OrderFilter {
        status: query.status,
        order_type: query.order_type,
        sort_order: query.sort_order.unwrap_or_default(),
        limit,
        offset,
    };

    let (items, total) = state.store.list_orders(&filter).await?;
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_order(
    state: &AppState,
    _staff: &AuthStaff,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    let order = load_order(state, id).await?;
    let insights = OrderInsights {
        next_statuses: next_possible_statuses(&order),
        delay: analyze_delay(&order, Utc::now()),
        complexity: analyze_complexity(&order),
        station: assign_kitchen_station(&order),
        payment_requirements: payment_requirements(&order),
        minimum_payment: minimum_payment(&order),
    };

    Ok(ApiResponse::success(
        "Order",
        OrderDetail { order, insights },
        Some(Meta::empty()),
    ))
}

/// Roles allowed to move an order into `to`.
fn status_roles(to: OrderStatus) -> &'static [StaffRole] {
    match to {
        OrderStatus::Preparing | OrderStatus::ReadyForService => {
            &[StaffRole::Kitchen, StaffRole::Cashier]
        }
        OrderStatus::OutForDelivery => &[StaffRole::Courier, StaffRole::Cashier],
        OrderStatus::Served => &[StaffRole::Waiter, StaffRole::Cashier],
        OrderStatus::Completed => &[StaffRole::Waiter, StaffRole::Cashier, StaffRole::Courier],
        _ => &[StaffRole::Cashier, StaffRole::Waiter],
    }
}

pub async fn update_status(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
    payload: UpdateStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let to = payload.status;
    ensure_any_role(staff, status_roles(to))?;

    let mut order = load_order(state, id).await?;
    let from = order.status;
    let now = Utc::now();

    apply_transition(&mut order, to, now)?;
    order.priority = escalated_priority(&order, now);
    state.store.save_order(&order).await?;

    tracing::info!(order_id = %order.id, %from, %to, "order status changed");
    record_event(
        state,
        OrderEvent::new(
            order.id,
            Some(staff.staff_id),
            "status_changed",
            json!({ "from": from, "to": to }),
        ),
    )
    .await;

    Ok(ApiResponse::success("Status updated", order, Some(Meta::empty())))
}

pub async fn record_payment(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
    payload: RecordPaymentRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_any_role(
        staff,
        &[StaffRole::Cashier, StaffRole::Waiter, StaffRole::Courier],
    )?;

    let mut order = load_order(state, id).await?;
    apply_payment(&mut order, payload.method, payload.amount, Utc::now())?;
    state.store.save_order(&order).await?;

    tracing::info!(
        order_id = %order.id,
        method = %payload.method,
        amount = payload.amount,
        payment_status = %order.payment_status,
        "payment recorded"
    );
    record_event(
        state,
        OrderEvent::new(
            order.id,
            Some(staff.staff_id),
            "payment_recorded",
            json!({
                "method": payload.method,
                "amount": payload.amount,
                "paid_amount": order.paid_amount,
                "payment_status": order.payment_status,
            }),
        ),
    )
    .await;

    Ok(ApiResponse::success("Payment recorded", order, Some(Meta::empty())))
}

/// Manual override; unlike the automatic recalculation this may lower priority.
pub async fn set_priority(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
    payload: SetPriorityRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_any_role(staff, &[StaffRole::Cashier, StaffRole::Kitchen])?;

    let mut order = load_order(state, id).await?;
    if order.status.is_terminal() {
        return Err(AppError::BadRequest(format!(
            "Order is {} and can no longer be reprioritized",
            order.status
        )));
    }

    let from = order.priority;
    order.priority = payload.priority;
    order.updated_at = Utc::now();
    state.store.save_order(&order).await?;

    tracing::info!(order_id = %order.id, %from, to = %order.priority, "order priority set");
    record_event(
        state,
        OrderEvent::new(
            order.id,
            Some(staff.staff_id),
            "priority_changed",
            json!({ "from": from, "to": order.priority }),
        ),
    )
    .await;

    Ok(ApiResponse::success("Priority updated", order, Some(Meta::empty())))
}

pub async fn assign_courier(
    state: &AppState,
    staff: &AuthStaff,
    id: Uuid,
    payload: AssignCourierRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_any_role(staff, &[StaffRole::Cashier])?;

    let mut order = load_order(state, id).await?;
    if order.order_type != OrderType::Delivery {
        return Err(AppError::BadRequest(
            "Couriers can only be assigned to delivery orders".into(),
        ));
    }
    if order.status.is_terminal() {
        return Err(AppError::BadRequest(format!("Order is {}", order.status)));
    }

    let courier = state
        .store
        .get_staff(payload.courier_id)
        .await?
        .filter(|member| member.role == StaffRole::Courier)
        .ok_or_else(|| AppError::BadRequest("Courier not found".into()))?;

    order.courier_id = Some(courier.id);
    order.updated_at = Utc::now();
    state.store.save_order(&order).await?;

    tracing::info!(order_id = %order.id, courier_id = %courier.id, "courier assigned");
    record_event(
        state,
        OrderEvent::new(
            order.id,
            Some(staff.staff_id),
            "courier_assigned",
            json!({ "courier_id": courier.id }),
        ),
    )
    .await;

    Ok(ApiResponse::success("Courier assigned", order, Some(Meta::empty())))
}

/// Estimates the delivery leg for `distance_km` and stores the result on the order.
pub async fn delivery_estimate(
    state: &AppState,
    _staff: &AuthStaff,
    id: Uuid,
    distance_km: f64,
) -> AppResult<ApiResponse<DeliveryEstimate>> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(AppError::BadRequest(
            "distance_km must be a non-negative number".into(),
        ));
    }

    let mut order = load_order(state, id).await?;
    if order.order_type != OrderType::Delivery {
        return Err(AppError::BadRequest(
            "Delivery estimates only apply to delivery orders".into(),
        ));
    }

    let now = Utc::now();
    let ctx = state.estimate_context(now).await?;
    let estimate = delivery_time_estimate(&order, distance_km, &ctx);

    if !order.status.is_terminal() {
        order.estimated_delivery_time = Some(estimate.estimated_delivery_time);
        order.updated_at = now;
        state.store.save_order(&order).await?;
    }

    Ok(ApiResponse::success(
        "Delivery estimate",
        estimate,
        Some(Meta::empty()),
    ))
}

pub async fn order_events(
    state: &AppState,
    _staff: &AuthStaff,
    id: Uuid,
) -> AppResult<ApiResponse<OrderEventList>> {
    let order = load_order(state, id).await?;
    let items = state.store.order_events(order.id).await?;
    Ok(ApiResponse::success(
        "Order events",
        OrderEventList { items },
        Some(Meta::empty()),
    ))
}

async fn load_order(state: &AppState, id: Uuid) -> AppResult<Order> {
    state.store.get_order(id).await?.ok_or(AppError::NotFound)
}

async fn record_event(state: &AppState, event: OrderEvent) {
    if let Err(err) = state.store.record_event(&event).await {
        tracing::warn!(error = %err, order_id = %event.order_id, action = %event.action, "order event log failed");
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_placement(payload: &PlaceOrderRequest) -> AppResult<()> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Order has no items".into()));
    }
    if payload.items.iter().any(|item| item.quantity == 0) {
        return Err(AppError::BadRequest(
            "Item quantity must be greater than 0".into(),
        ));
    }
    if payload.items.iter().any(|item| item.quantity > MAX_LINE_QUANTITY) {
        return Err(AppError::BadRequest(format!(
            "Item quantity must be at most {MAX_LINE_QUANTITY}"
        )));
    }

    let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
    match payload.order_type {
        OrderType::DineIn if !filled(&payload.table_id) && !filled(&payload.table_name) => {
            return Err(AppError::BadRequest("Dine-in orders need a table".into()));
        }
        OrderType::Delivery if !filled(&payload.delivery_address) => {
            return Err(AppError::BadRequest(
                "Delivery orders need a delivery address".into(),
            ));
        }
        _ => {}
    }

    if let Some(distance_km) = payload.distance_km {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(AppError::BadRequest(
                "distance_km must be a non-negative number".into(),
            ));
        }
    }
    Ok(())
}

/// Copies name, category and price from the menu into the order lines.
async fn build_cart(state: &AppState, payload: &PlaceOrderRequest) -> AppResult<Vec<CartItem>> {
    let ids: Vec<Uuid> = payload
        .items
        .iter()
        .map(|item| item.food_item_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let menu: HashMap<Uuid, _> = state
        .store
        .food_items_by_ids(&ids)
        .await?
        .into_iter()
        .map(|food| (food.id, food))
        .collect();

    payload
        .items
        .iter()
        .map(|line| {
            let food = menu.get(&line.food_item_id).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown menu item {}", line.food_item_id))
            })?;
            if !food.available {
                return Err(AppError::BadRequest(format!(
                    "{} is not available",
                    food.name
                )));
            }
            Ok(CartItem {
                food_item_id: food.id,
                name: food.name.clone(),
                category: food.category,
                unit_price: food.price,
                quantity: line.quantity,
                note: non_blank(line.note.clone()),
            })
        })
        .collect()
}
