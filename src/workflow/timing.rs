use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::model::{Order, OrderPriority, OrderType};

pub const MIN_PREPARATION_MINUTES: i64 = 5;

const COURIER_SPEED_KMH: f64 = 30.0;
const TRAFFIC_BUFFER: f64 = 1.5;
const HANDOFF_MINUTES: i64 = 10;

/// Inputs an estimate depends on besides the order itself.
#[derive(Debug, Clone, Copy)]
pub struct EstimateContext {
    pub now: DateTime<Utc>,
    /// Local hour of day, 0..=23.
    pub hour: u32,
    /// How busy the kitchen is, 0.0 (idle) to 1.0 (saturated).
    pub kitchen_load: f64,
}

impl EstimateContext {
    /// Idle kitchen, hour taken from `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            hour: now.hour(),
            kitchen_load: 0.0,
        }
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = hour % 24;
        self
    }

    pub fn with_kitchen_load(mut self, load: f64) -> Self {
        self.kitchen_load = if load.is_finite() { load.clamp(0.0, 1.0) } else { 0.0 };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimingFactors {
    pub base_minutes: u32,
    pub order_type_multiplier: f64,
    pub priority_multiplier: f64,
    pub time_of_day_multiplier: f64,
    pub kitchen_load_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PreparationEstimate {
    pub minutes: i64,
    pub ready_time: DateTime<Utc>,
    pub factors: TimingFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DeliveryEstimate {
    pub preparation_minutes: i64,
    pub delivery_minutes: i64,
    pub total_minutes: i64,
    pub ready_for_delivery_time: DateTime<Utc>,
    pub estimated_delivery_time: DateTime<Utc>,
}

pub fn order_type_multiplier(order_type: OrderType) -> f64 {
    match order_type {
        OrderType::DineIn => 1.2,
        OrderType::Takeaway => 0.9,
        OrderType::Delivery => 1.1,
    }
}

pub fn priority_multiplier(priority: OrderPriority) -> f64 {
    match priority {
        OrderPriority::Urgent => 0.7,
        OrderPriority::High => 0.8,
        OrderPriority::Normal => 1.0,
        OrderPriority::Low => 1.3,
    }
}

/// Rush hours slow the kitchen down, the night shift is quicker.
pub fn time_of_day_multiplier(hour: u32) -> f64 {
    match hour {
        12..14 | 19..21 => 1.4,
        17..19 => 1.2,
        22..=23 | 0..6 => 0.8,
        _ => 1.0,
    }
}

pub fn kitchen_load_multiplier(load: f64) -> f64 {
    1.0 + load.clamp(0.0, 1.0) * 0.8
}

pub fn estimated_preparation_minutes(order: &Order, ctx: &EstimateContext) -> PreparationEstimate {
    let factors = TimingFactors {
        base_minutes: order
            .items
            .iter()
            .map(|item| item.base_minutes())
            .fold(0, u32::saturating_add),
        order_type_multiplier: order_type_multiplier(order.order_type),
        priority_multiplier: priority_multiplier(order.priority),
        time_of_day_multiplier: time_of_day_multiplier(ctx.hour),
        kitchen_load_multiplier: kitchen_load_multiplier(ctx.kitchen_load),
    };

    let raw = f64::from(factors.base_minutes)
        * factors.order_type_multiplier
        * factors.priority_multiplier
        * factors.time_of_day_multiplier
        * factors.kitchen_load_multiplier;
    let minutes = (raw.round() as i64).max(MIN_PREPARATION_MINUTES);

    PreparationEstimate {
        minutes,
        ready_time: ctx.now + Duration::minutes(minutes),
        factors,
    }
}

/// Minutes a courier needs for `distance_km`, including the handoff at the door.
pub fn delivery_leg_minutes(distance_km: f64) -> i64 {
    let distance_km = if distance_km.is_finite() { distance_km.max(0.0) } else { 0.0 };
    (distance_km / COURIER_SPEED_KMH * 60.0 * TRAFFIC_BUFFER).round() as i64 + HANDOFF_MINUTES
}

pub fn delivery_time_estimate(
    order: &Order,
    distance_km: f64,
    ctx: &EstimateContext,
) -> DeliveryEstimate {
    let preparation = estimated_preparation_minutes(order, ctx);
    let delivery_minutes = delivery_leg_minutes(distance_km);

    DeliveryEstimate {
        preparation_minutes: preparation.minutes,
        delivery_minutes,
        total_minutes: preparation.minutes + delivery_minutes,
        ready_for_delivery_time: preparation.ready_time,
        estimated_delivery_time: preparation.ready_time + Duration::minutes(delivery_minutes),
    }
}
