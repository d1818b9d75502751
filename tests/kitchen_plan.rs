use chrono::{DateTime, Duration, TimeZone, Utc};
use restaurant_pos_api::workflow::{
    CartItem, FoodCategory, KitchenStation, Order, OrderPriority, OrderStatus, OrderType,
    assign_kitchen_station, kitchen::PARALLEL_BATCH_SIZE, kitchen_workflow_plan,
};
use uuid::Uuid;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 18, 0, 0).unwrap()
}

fn kitchen_order(
    number: i64,
    minutes_after: i64,
    status: OrderStatus,
    categories: &[FoodCategory],
) -> Order {
    let items = categories
        .iter()
        .map(|category| CartItem {
            food_item_id: Uuid::new_v4(),
            name: category.to_string(),
            category: *category,
            unit_price: 100_00,
            quantity: 1,
            note: None,
        })
        .collect();
    let mut order = Order::new(
        Uuid::new_v4(),
        number,
        OrderType::DineIn,
        items,
        base_time() + Duration::minutes(minutes_after),
    );
    order.status = status;
    order
}

#[test]
fn seven_grill_orders_flag_a_grill_bottleneck() {
    let orders: Vec<Order> = (0..7)
        .map(|n| kitchen_order(n + 1, n, OrderStatus::Preparing, &[FoodCategory::Meat]))
        .collect();

    let plan = kitchen_workflow_plan(&orders);
    assert_eq!(plan.station_assignments.grill.len(), 7);
    assert_eq!(plan.bottlenecks.len(), 1);

    let grill = &plan.bottlenecks[0];
    assert_eq!(grill.station, KitchenStation::Grill);
    assert_eq!(grill.order_count, 7);
    assert_eq!(grill.expected_delay_minutes, 6);
    assert_eq!(plan.estimated_throughput_minutes, 35);
}

#[test]
fn prep_bottleneck_past_eight_orders() {
    let orders: Vec<Order> = (0..10)
        .map(|n| kitchen_order(n + 1, n, OrderStatus::Confirmed, &[FoodCategory::Pizza]))
        .collect();

    let plan = kitchen_workflow_plan(&orders);
    let prep = plan
        .bottlenecks
        .iter()
        .find(|b| b.station == KitchenStation::Prep)
        .expect("prep bottleneck");
    assert_eq!(prep.expected_delay_minutes, 4);
    assert!(plan.bottlenecks.iter().all(|b| b.station != KitchenStation::Grill));
}

#[test]
fn queue_orders_by_priority_then_age_and_skips_orders_outside_the_kitchen() {
    let mut urgent_late = kitchen_order(1, 10, OrderStatus::Preparing, &[FoodCategory::Salad]);
    urgent_late.priority = OrderPriority::Urgent;
    let normal_early = kitchen_order(2, 0, OrderStatus::Confirmed, &[FoodCategory::Burger]);
    let normal_later = kitchen_order(3, 5, OrderStatus::Preparing, &[FoodCategory::Drink]);
    let pending = kitchen_order(4, 1, OrderStatus::PendingConfirmation, &[FoodCategory::Meat]);
    let served = kitchen_order(5, 2, OrderStatus::Served, &[FoodCategory::Meat]);

    let plan = kitchen_workflow_plan(&[
        normal_later.clone(),
        pending,
        urgent_late.clone(),
        served,
        normal_early.clone(),
    ]);

    let queue: Vec<Uuid> = plan.priority_queue.iter().map(|e| e.order_id).collect();
    assert_eq!(queue, vec![urgent_late.id, normal_early.id, normal_later.id]);
    assert!(plan.bottlenecks.is_empty());
}

#[test]
fn parallel_groups_are_fixed_size_batches_of_the_queue() {
    let orders: Vec<Order> = (0..7)
        .map(|n| kitchen_order(n + 1, n, OrderStatus::Preparing, &[FoodCategory::Salad]))
        .collect();

    let plan = kitchen_workflow_plan(&orders);
    let sizes: Vec<usize> = plan.parallel_groups.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![PARALLEL_BATCH_SIZE, PARALLEL_BATCH_SIZE, 1]);
    assert_eq!(plan.parallel_groups[0][0], orders[0].id);
}

#[test]
fn every_order_passes_the_finisher() {
    let mixed = kitchen_order(
        1,
        0,
        OrderStatus::Preparing,
        &[FoodCategory::Burger, FoodCategory::Salad, FoodCategory::Drink],
    );
    let plan = kitchen_workflow_plan(std::slice::from_ref(&mixed));
    assert_eq!(plan.station_assignments.finisher, vec![mixed.id]);
    assert_eq!(plan.station_assignments.grill, vec![mixed.id]);
    assert_eq!(plan.station_assignments.cold, vec![mixed.id]);
    assert!(plan.station_assignments.prep.is_empty());
}

#[test]
fn primary_station_carries_the_most_minutes() {
    let order = kitchen_order(
        1,
        0,
        OrderStatus::Confirmed,
        &[FoodCategory::Pizza, FoodCategory::Salad, FoodCategory::Burger],
    );
    let assignment = assign_kitchen_station(&order);
    assert_eq!(assignment.primary, KitchenStation::Prep);
    assert_eq!(
        assignment.stations,
        vec![
            KitchenStation::Grill,
            KitchenStation::Prep,
            KitchenStation::Cold,
            KitchenStation::Finisher
        ]
    );

    let drinks_only = kitchen_order(2, 0, OrderStatus::Confirmed, &[FoodCategory::Drink]);
    assert_eq!(assign_kitchen_station(&drinks_only).primary, KitchenStation::Cold);
}

#[test]
fn empty_kitchen_plans_nothing() {
    let plan = kitchen_workflow_plan(&[]);
    assert!(plan.priority_queue.is_empty());
    assert!(plan.parallel_groups.is_empty());
    assert_eq!(plan.estimated_throughput_minutes, 0);
}
