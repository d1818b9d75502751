use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

/// Suggested price adjustment. Purely advisory: nothing in the service
/// writes `adjusted_total` back to an order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PricingSuggestion {
    pub apply: bool,
    pub multiplier: f64,
    pub reason: String,
    pub adjusted_total: Option<i64>,
}

pub fn is_peak_hour(hour: u32) -> bool {
    matches!(hour, 12..14 | 19..21)
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// `order_time` is restaurant-local wall clock time.
pub fn dynamic_pricing_suggestion(order_time: NaiveDateTime, total: i64) -> PricingSuggestion {
    let hour = order_time.hour();
    let peak = is_peak_hour(hour);
    let weekend = is_weekend(order_time.weekday());

    let (multiplier, reason) = if peak && weekend {
        (1.15, "weekend peak hours")
    } else if peak {
        (1.10, "peak hours")
    } else if (14..17).contains(&hour) {
        (0.95, "off-peak discount")
    } else {
        return PricingSuggestion {
            apply: false,
            multiplier: 1.0,
            reason: "normal hours".into(),
            adjusted_total: None,
        };
    };

    PricingSuggestion {
        apply: true,
        multiplier,
        reason: reason.into(),
        adjusted_total: Some((total as f64 * multiplier).round() as i64),
    }
}
