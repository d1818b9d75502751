use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use restaurant_pos_api::{
    error::WorkflowError,
    workflow::timing::{order_type_multiplier, priority_multiplier, time_of_day_multiplier},
    workflow::{
        CartItem, ComplexityLevel, DelaySeverity, EstimateContext, FoodCategory, Order,
        OrderPriority, OrderStatus, OrderType, PaymentMethod, PaymentStatus, PaymentTiming,
        analyze_complexity, analyze_delay, apply_payment, apply_transition,
        calculate_order_priority, delivery_time_estimate, dynamic_pricing_suggestion,
        escalated_priority, estimated_preparation_minutes, is_valid_transition,
        minimum_payment, next_possible_statuses, payment_requirements, payment_strategy,
        validate_payment,
    },
};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    // a Wednesday
    Utc.with_ymd_and_hms(2026, 10, 14, 10, 0, 0).unwrap()
}

fn item(category: FoodCategory, unit_price: i64, quantity: u32) -> CartItem {
    CartItem {
        food_item_id: Uuid::new_v4(),
        name: format!("{category} item"),
        category,
        unit_price,
        quantity,
        note: None,
    }
}

fn order(order_type: OrderType, items: Vec<CartItem>) -> Order {
    Order::new(Uuid::new_v4(), 1, order_type, items, now())
}

fn order_with_total(order_type: OrderType, total: i64) -> Order {
    order(order_type, vec![item(FoodCategory::Other, total, 1)])
}

#[test]
fn new_order_starts_pending_with_computed_total() {
    let o = order(
        OrderType::DineIn,
        vec![
            item(FoodCategory::Pizza, 185_00, 2),
            item(FoodCategory::Drink, 25_00, 3),
        ],
    );
    assert_eq!(o.total, 445_00);
    assert_eq!(o.status, OrderStatus::PendingConfirmation);
    assert_eq!(o.payment_status, PaymentStatus::Pending);
    assert_eq!(o.priority, OrderPriority::Normal);
    assert_eq!(o.item_count(), 5);
}

#[test]
fn terminal_statuses_have_no_successors() {
    for order_type in OrderType::ALL {
        for status in [OrderStatus::Completed, OrderStatus::Cancelled] {
            let mut o = order(*order_type, vec![item(FoodCategory::Salad, 70_00, 1)]);
            o.status = status;
            assert!(next_possible_statuses(&o).is_empty(), "{order_type} {status}");
        }
    }
}

#[test]
fn transitions_outside_the_table_are_rejected_and_leave_the_order_untouched() {
    for order_type in OrderType::ALL {
        for from in OrderStatus::ALL {
            for payment_status in [PaymentStatus::Pending, PaymentStatus::Paid] {
                let mut o = order(*order_type, vec![item(FoodCategory::Burger, 165_00, 1)]);
                o.status = *from;
                o.payment_status = payment_status;
                let allowed = next_possible_statuses(&o);

                for to in OrderStatus::ALL {
                    let mut candidate = o.clone();
                    let result = apply_transition(&mut candidate, *to, now());
                    if allowed.contains(to) {
                        assert!(result.is_ok());
                        assert_eq!(candidate.status, *to);
                    } else {
                        assert!(matches!(
                            result,
                            Err(WorkflowError::IllegalTransition { .. })
                        ));
                        assert_eq!(candidate, o);
                    }
                }
            }
        }
    }
}

#[test]
fn dine_in_happy_path_stamps_timestamps() {
    let mut o = order(OrderType::DineIn, vec![item(FoodCategory::Meat, 240_00, 1)]);
    let t = now();

    apply_transition(&mut o, OrderStatus::Confirmed, t).unwrap();
    apply_transition(&mut o, OrderStatus::Preparing, t + Duration::minutes(1)).unwrap();
    apply_transition(&mut o, OrderStatus::ReadyForService, t + Duration::minutes(15)).unwrap();
    apply_transition(&mut o, OrderStatus::Served, t + Duration::minutes(16)).unwrap();

    // unpaid served table goes to payment, not straight to completed
    assert_eq!(next_possible_statuses(&o), vec![OrderStatus::ReadyForPayment]);
    let total = o.total;
    apply_payment(&mut o, PaymentMethod::MealCard, total, t + Duration::minutes(40)).unwrap();
    assert_eq!(next_possible_statuses(&o), vec![OrderStatus::Completed]);
    apply_transition(&mut o, OrderStatus::Completed, t + Duration::minutes(41)).unwrap();

    assert_eq!(o.confirmed_at, Some(t));
    assert_eq!(o.prepared_at, Some(t + Duration::minutes(15)));
    assert_eq!(o.served_at, Some(t + Duration::minutes(16)));
    assert_eq!(o.completed_at, Some(t + Duration::minutes(41)));
}

#[test]
fn ready_for_service_branches_by_order_type() {
    let mut dine_in = order(OrderType::DineIn, vec![item(FoodCategory::Pizza, 185_00, 1)]);
    dine_in.status = OrderStatus::ReadyForService;
    assert_eq!(
        next_possible_statuses(&dine_in),
        vec![OrderStatus::Served, OrderStatus::ReadyForPayment]
    );

    let mut delivery = order(OrderType::Delivery, vec![item(FoodCategory::Pizza, 185_00, 1)]);
    delivery.status = OrderStatus::ReadyForService;
    assert_eq!(
        next_possible_statuses(&delivery),
        vec![OrderStatus::OutForDelivery, OrderStatus::Cancelled]
    );

    let mut takeaway = order(OrderType::Takeaway, vec![item(FoodCategory::Pizza, 185_00, 1)]);
    takeaway.status = OrderStatus::ReadyForService;
    assert_eq!(next_possible_statuses(&takeaway), vec![OrderStatus::Completed]);
}

#[test]
fn ready_for_payment_only_moves_to_preparing_once_paid() {
    let mut o = order(OrderType::Takeaway, vec![item(FoodCategory::Burger, 165_00, 1)]);
    o.status = OrderStatus::ReadyForPayment;
    assert_eq!(next_possible_statuses(&o), vec![OrderStatus::Cancelled]);
    assert!(!o.can_transition_to(OrderStatus::Preparing));

    let total = o.total;
    apply_payment(&mut o, PaymentMethod::Card, total, now()).unwrap();
    assert_eq!(next_possible_statuses(&o), vec![OrderStatus::Preparing]);
}

#[test]
fn structural_transition_check_ignores_payment() {
    assert!(is_valid_transition(
        OrderStatus::ReadyForPayment,
        OrderStatus::Preparing,
        OrderType::Takeaway
    ));
    assert!(is_valid_transition(
        OrderStatus::Served,
        OrderStatus::Completed,
        OrderType::DineIn
    ));
    assert!(!is_valid_transition(
        OrderStatus::Confirmed,
        OrderStatus::ReadyForPayment,
        OrderType::DineIn
    ));
    assert!(!is_valid_transition(
        OrderStatus::Completed,
        OrderStatus::Preparing,
        OrderType::Delivery
    ));
}

#[test]
fn preparation_estimate_multiplies_factors() {
    let o = order(OrderType::DineIn, vec![item(FoodCategory::Pizza, 185_00, 1)]);
    let ctx = EstimateContext::at(now()).with_hour(10);

    let estimate = estimated_preparation_minutes(&o, &ctx);
    // 15 * 1.2 dine-in
    assert_eq!(estimate.minutes, 18);
    assert_eq!(estimate.ready_time, now() + Duration::minutes(18));
    assert_eq!(estimate.factors.base_minutes, 15);

    let busy = ctx.with_hour(13).with_kitchen_load(1.0);
    // 15 * 1.2 * 1.4 * 1.8
    assert_eq!(estimated_preparation_minutes(&o, &busy).minutes, 45);
}

#[test]
fn time_of_day_bands_cover_every_hour() {
    let expected = [
        (0, 0.8),
        (1, 0.8),
        (2, 0.8),
        (3, 0.8),
        (4, 0.8),
        (5, 0.8),
        (6, 1.0),
        (7, 1.0),
        (8, 1.0),
        (9, 1.0),
        (10, 1.0),
        (11, 1.0),
        (12, 1.4),
        (13, 1.4),
        (14, 1.0),
        (15, 1.0),
        (16, 1.0),
        (17, 1.2),
        (18, 1.2),
        (19, 1.4),
        (20, 1.4),
        (21, 1.0),
        (22, 0.8),
        (23, 0.8),
    ];
    for (hour, multiplier) in expected {
        assert_eq!(time_of_day_multiplier(hour), multiplier, "hour {hour}");
    }
}

#[test]
fn preparation_estimate_per_order_type() {
    let ctx = EstimateContext::at(now()).with_hour(10);
    let cases = [
        (OrderType::DineIn, 1.2, 36),
        (OrderType::Takeaway, 0.9, 27),
        (OrderType::Delivery, 1.1, 33),
    ];
    for (order_type, multiplier, minutes) in cases {
        assert_eq!(order_type_multiplier(order_type), multiplier);
        // two pizzas, 30 base minutes
        let o = order(order_type, vec![item(FoodCategory::Pizza, 185_00, 2)]);
        assert_eq!(estimated_preparation_minutes(&o, &ctx).minutes, minutes, "{order_type}");
    }
}

#[test]
fn preparation_estimate_per_priority() {
    let ctx = EstimateContext::at(now()).with_hour(10);
    let cases = [
        (OrderPriority::Urgent, 0.7, 25),
        (OrderPriority::High, 0.8, 29),
        (OrderPriority::Normal, 1.0, 36),
        (OrderPriority::Low, 1.3, 47),
    ];
    for (priority, multiplier, minutes) in cases {
        assert_eq!(priority_multiplier(priority), multiplier);
        let mut o = order(OrderType::DineIn, vec![item(FoodCategory::Pizza, 185_00, 2)]);
        o.priority = priority;
        assert_eq!(estimated_preparation_minutes(&o, &ctx).minutes, minutes, "{priority}");
    }
}

#[test]
fn preparation_estimate_in_evening_and_night_bands() {
    let o = order(OrderType::DineIn, vec![item(FoodCategory::Pizza, 185_00, 1)]);
    let minutes_at = |hour| {
        estimated_preparation_minutes(&o, &EstimateContext::at(now()).with_hour(hour)).minutes
    };
    // 18 * 1.2
    assert_eq!(minutes_at(17), 22);
    assert_eq!(minutes_at(18), 22);
    // 18 * 0.8
    assert_eq!(minutes_at(22), 14);
    assert_eq!(minutes_at(23), 14);
    assert_eq!(minutes_at(0), 14);
    assert_eq!(minutes_at(5), 14);
    assert_eq!(minutes_at(6), 18);
    assert_eq!(minutes_at(21), 18);
}

#[test]
fn oversized_quantities_saturate_instead_of_overflowing() {
    let o = order(
        OrderType::Takeaway,
        vec![
            item(FoodCategory::Pizza, i64::MAX / 2, u32::MAX),
            item(FoodCategory::Drink, i64::MAX / 2, u32::MAX),
        ],
    );
    assert_eq!(o.items[0].base_minutes(), u32::MAX);
    assert_eq!(o.items[0].line_total(), i64::MAX);
    assert_eq!(o.total, i64::MAX);
    assert_eq!(o.item_count(), u32::MAX);

    let analysis = analyze_complexity(&o);
    assert_eq!(analysis.complexity_score, u32::MAX);
    assert_eq!(analysis.complexity_level, ComplexityLevel::VeryComplex);
}

#[test]
fn preparation_estimate_never_drops_below_five_minutes() {
    let mut o = order(OrderType::Takeaway, vec![item(FoodCategory::Drink, 25_00, 1)]);
    for priority in OrderPriority::ALL {
        o.priority = *priority;
        for hour in 0..24 {
            for load in [0.0, 0.5, 1.0] {
                let ctx = EstimateContext::at(now())
                    .with_hour(hour)
                    .with_kitchen_load(load);
                assert!(estimated_preparation_minutes(&o, &ctx).minutes >= 5);
            }
        }
    }
}

#[test]
fn kitchen_load_is_clamped() {
    let ctx = EstimateContext::at(now()).with_kitchen_load(7.5);
    assert_eq!(ctx.kitchen_load, 1.0);
    let ctx = EstimateContext::at(now()).with_kitchen_load(f64::NAN);
    assert_eq!(ctx.kitchen_load, 0.0);
}

#[test]
fn delivery_estimate_adds_courier_leg() {
    let o = order(OrderType::Delivery, vec![item(FoodCategory::Burger, 165_00, 2)]);
    let ctx = EstimateContext::at(now()).with_hour(10);

    let estimate = delivery_time_estimate(&o, 5.0, &ctx);
    // 16 * 1.1 = 17.6
    assert_eq!(estimate.preparation_minutes, 18);
    // 5 km at 30 km/h with traffic buffer, plus handoff
    assert_eq!(estimate.delivery_minutes, 25);
    assert_eq!(estimate.total_minutes, 43);
    assert_eq!(
        estimate.estimated_delivery_time,
        estimate.ready_for_delivery_time + Duration::minutes(25)
    );
}

#[test]
fn delivery_below_minimum_reports_minimum() {
    let o = order_with_total(OrderType::Delivery, 40_00);
    let minimum = minimum_payment(&o);
    assert!(minimum.below_minimum);
    assert_eq!(minimum.minimum_amount, 50_00);
    assert!(!minimum.reason.is_empty());
}

#[test]
fn large_delivery_requires_half_deposit() {
    let o = order_with_total(OrderType::Delivery, 350_00);
    let minimum = minimum_payment(&o);
    assert!(minimum.requires_deposit);
    assert_eq!(minimum.deposit_amount, Some(175_00));
    assert_eq!(minimum.minimum_amount, 175_00);

    let odd = order_with_total(OrderType::Delivery, 300_01);
    assert_eq!(minimum_payment(&odd).deposit_amount, Some(150_01));
}

#[test]
fn payment_methods_per_order_type() {
    let takeaway = payment_strategy(OrderType::Takeaway);
    assert!(!takeaway.preferred_methods.contains(&PaymentMethod::MealCard));
    assert!(takeaway.requires_upfront_payment);

    let dine_in = payment_strategy(OrderType::DineIn);
    assert!(dine_in.preferred_methods.contains(&PaymentMethod::MealCard));
    assert!(dine_in.allows_table_payment);

    let delivery = payment_strategy(OrderType::Delivery);
    assert!(delivery.allows_cash_on_delivery);
    assert!(!delivery.preferred_methods.contains(&PaymentMethod::Card));
}

#[test]
fn payment_timing_follows_order_type() {
    let takeaway = payment_requirements(&order_with_total(OrderType::Takeaway, 100_00));
    assert!(takeaway.must_pay_now);
    assert_eq!(takeaway.suggested_timing, PaymentTiming::BeforePreparation);

    let dine_in = payment_requirements(&order_with_total(OrderType::DineIn, 100_00));
    assert!(dine_in.can_pay_later);
    assert_eq!(dine_in.suggested_timing, PaymentTiming::AfterService);
}

#[test]
fn payment_validation_rejects_bad_attempts() {
    let dine_in = order_with_total(OrderType::DineIn, 100_00);
    assert!(validate_payment(&dine_in, PaymentMethod::Cash, 0).is_err());
    assert!(validate_payment(&dine_in, PaymentMethod::Online, 100_00).is_err());
    assert!(validate_payment(&dine_in, PaymentMethod::Cash, 50_00).is_err());
    assert!(validate_payment(&dine_in, PaymentMethod::Cash, 100_00).is_ok());

    let mut cancelled = dine_in.clone();
    cancelled.status = OrderStatus::Cancelled;
    assert!(validate_payment(&cancelled, PaymentMethod::Cash, 100_00).is_err());

    let small_delivery = order_with_total(OrderType::Delivery, 40_00);
    assert!(validate_payment(&small_delivery, PaymentMethod::Cash, 40_00).is_err());
}

#[test]
fn deposit_then_balance_on_delivery() {
    let mut o = order_with_total(OrderType::Delivery, 350_00);
    assert!(validate_payment(&o, PaymentMethod::Online, 100_00).is_err());

    apply_payment(&mut o, PaymentMethod::Online, 175_00, now()).unwrap();
    assert_eq!(o.payment_status, PaymentStatus::Partial);
    assert_eq!(o.outstanding(), 175_00);

    apply_payment(&mut o, PaymentMethod::Cash, 200_00, now()).unwrap();
    assert_eq!(o.payment_status, PaymentStatus::Paid);
    assert_eq!(o.paid_amount, 350_00);

    let err = apply_payment(&mut o, PaymentMethod::Cash, 1_00, now()).unwrap_err();
    assert!(matches!(err, WorkflowError::PaymentRejected(_)));
}

#[test]
fn takeaway_takes_a_single_upfront_payment() {
    let mut o = order_with_total(OrderType::Takeaway, 120_00);
    apply_payment(&mut o, PaymentMethod::Card, 150_00, now()).unwrap();
    assert_eq!(o.paid_amount, 120_00);
    assert!(o.is_paid());
    assert!(apply_payment(&mut o, PaymentMethod::Card, 10_00, now()).is_err());
}

#[test]
fn delay_without_estimate_is_not_delayed() {
    let o = order_with_total(OrderType::DineIn, 100_00);
    let analysis = analyze_delay(&o, now());
    assert!(!analysis.is_delayed);
    assert_eq!(analysis.severity, DelaySeverity::OnTime);
}

#[test]
fn delay_twenty_minutes_past_estimate_is_moderate() {
    let mut o = order_with_total(OrderType::DineIn, 100_00);
    o.estimated_ready_time = Some(now() - Duration::minutes(20));

    let analysis = analyze_delay(&o, now());
    assert!(analysis.is_delayed);
    assert_eq!(analysis.delay_minutes, 20);
    assert_eq!(analysis.severity, DelaySeverity::Moderate);
    assert!(analysis.reason.starts_with("moderate delay"));
    assert!(analysis.suggested_action.is_some());
}

#[test]
fn delay_severity_bands() {
    let mut o = order_with_total(OrderType::Takeaway, 100_00);
    for (minutes, delayed, severity) in [
        (5, false, DelaySeverity::OnTime),
        (6, true, DelaySeverity::Mild),
        (15, true, DelaySeverity::Mild),
        (30, true, DelaySeverity::Moderate),
        (31, true, DelaySeverity::Severe),
    ] {
        o.estimated_ready_time = Some(now() - Duration::minutes(minutes));
        let analysis = analyze_delay(&o, now());
        assert_eq!(analysis.is_delayed, delayed, "{minutes}");
        assert_eq!(analysis.severity, severity, "{minutes}");
    }

    o.status = OrderStatus::Completed;
    assert!(!analyze_delay(&o, now()).is_delayed);
}

#[test]
fn estimate_ready_time_is_on_time_at_that_instant() {
    let o = order(OrderType::Delivery, vec![item(FoodCategory::Chicken, 150_00, 2)]);
    let ctx = EstimateContext::at(now()).with_hour(20).with_kitchen_load(0.4);
    let estimate = estimated_preparation_minutes(&o, &ctx);

    let mut tracked = o.clone();
    tracked.estimated_ready_time = Some(estimate.ready_time);
    let analysis = analyze_delay(&tracked, estimate.ready_time);
    assert!(!analysis.is_delayed);
    assert_eq!(analysis.delay_minutes, 0);
}

#[test]
fn priority_rules() {
    let mut old = order_with_total(OrderType::Takeaway, 10_00);
    old.created_at = now() - Duration::minutes(50);
    assert_eq!(calculate_order_priority(&old, now()), OrderPriority::Urgent);

    let fresh_delivery = order_with_total(OrderType::Delivery, 10);
    assert_eq!(
        calculate_order_priority(&fresh_delivery, now()),
        OrderPriority::High
    );

    let big_table = order_with_total(OrderType::DineIn, 250_00);
    assert_eq!(calculate_order_priority(&big_table, now()), OrderPriority::High);

    let small_table = order_with_total(OrderType::DineIn, 50_00);
    assert_eq!(
        calculate_order_priority(&small_table, now()),
        OrderPriority::Normal
    );
    assert_eq!(
        calculate_order_priority(&small_table, now() + Duration::minutes(31)),
        OrderPriority::High
    );
}

#[test]
fn automatic_priority_never_lowers_a_manual_raise() {
    let mut o = order_with_total(OrderType::DineIn, 50_00);
    o.priority = OrderPriority::Urgent;
    assert_eq!(escalated_priority(&o, now()), OrderPriority::Urgent);

    o.priority = OrderPriority::Low;
    assert_eq!(escalated_priority(&o, now()), OrderPriority::Normal);
}

#[test]
fn complexity_scores_and_recommendations() {
    let simple = order(OrderType::DineIn, vec![item(FoodCategory::Drink, 25_00, 1)]);
    let analysis = analyze_complexity(&simple);
    // 1*2 + 1*5 + 1*3
    assert_eq!(analysis.complexity_score, 10);
    assert_eq!(analysis.complexity_level, ComplexityLevel::Simple);
    assert!(analysis.recommendations.is_empty());

    let mut busy = order(
        OrderType::DineIn,
        vec![
            item(FoodCategory::Pizza, 185_00, 2),
            item(FoodCategory::Burger, 165_00, 2),
            item(FoodCategory::Salad, 70_00, 1),
            item(FoodCategory::Dessert, 90_00, 1),
        ],
    );
    busy.notes = Some("no onions anywhere".into());
    let analysis = analyze_complexity(&busy);
    // 6*2 + 4*5 + 10 + 4*3
    assert_eq!(analysis.complexity_score, 54);
    assert_eq!(analysis.complexity_level, ComplexityLevel::VeryComplex);
    let codes: Vec<&str> = analysis
        .recommendations
        .iter()
        .map(|s| s.code.as_str())
        .collect();
    assert_eq!(
        codes,
        vec![
            "split_preparation",
            "coordinate_stations",
            "check_instructions",
            "assign_experienced_cook"
        ]
    );
}

#[test]
fn pricing_suggestions_by_hour_and_day() {
    let at = |day: u32, hour: u32| {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    };

    // Saturday lunch
    let weekend_peak = dynamic_pricing_suggestion(at(17, 13), 100_00);
    assert!(weekend_peak.apply);
    assert_eq!(weekend_peak.multiplier, 1.15);
    assert_eq!(weekend_peak.adjusted_total, Some(115_00));

    // Wednesday dinner
    let peak = dynamic_pricing_suggestion(at(14, 19), 100_00);
    assert_eq!(peak.multiplier, 1.10);

    let off_peak = dynamic_pricing_suggestion(at(14, 15), 100_00);
    assert_eq!(off_peak.multiplier, 0.95);
    assert_eq!(off_peak.adjusted_total, Some(95_00));

    let normal = dynamic_pricing_suggestion(at(14, 10), 100_00);
    assert!(!normal.apply);
    assert_eq!(normal.adjusted_total, None);

    // 14:00 is no longer peak
    let boundary = NaiveDate::from_ymd_opt(2026, 10, 14)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    assert_eq!(dynamic_pricing_suggestion(boundary, 100_00).multiplier, 0.95);
}

#[test]
fn enum_text_round_trips_through_storage_strings() {
    for status in OrderStatus::ALL {
        assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), *status);
    }
    assert_eq!(OrderType::DineIn.as_str(), "DINE_IN");
    assert!("SUSHI".parse::<FoodCategory>().is_err());
}
