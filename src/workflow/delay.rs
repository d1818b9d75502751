use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::model::Order;

/// Delays up to this many minutes still count as on time.
pub const ON_TIME_TOLERANCE_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelaySeverity {
    OnTime,
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DelayAnalysis {
    pub is_delayed: bool,
    pub delay_minutes: i64,
    pub severity: DelaySeverity,
    pub reason: String,
    pub suggested_action: Option<String>,
}

impl DelayAnalysis {
    fn on_time(delay_minutes: i64, reason: &str) -> Self {
        Self {
            is_delayed: false,
            delay_minutes,
            severity: DelaySeverity::OnTime,
            reason: reason.to_string(),
            suggested_action: None,
        }
    }
}

pub fn analyze_delay(order: &Order, now: DateTime<Utc>) -> DelayAnalysis {
    if order.status.is_terminal() {
        return DelayAnalysis::on_time(0, "order closed");
    }
    let Some(ready_time) = order.estimated_ready_time else {
        return DelayAnalysis::on_time(0, "no estimate");
    };

    let delay_minutes = (now - ready_time).num_minutes().max(0);
    let (severity, reason, action) = match delay_minutes {
        m if m <= ON_TIME_TOLERANCE_MINUTES => {
            return DelayAnalysis::on_time(delay_minutes, "on time");
        }
        6..=15 => (DelaySeverity::Mild, "mild delay", "monitor the order"),
        16..=30 => (
            DelaySeverity::Moderate,
            "moderate delay",
            "notify the customer about the delay",
        ),
        _ => (
            DelaySeverity::Severe,
            "severe delay",
            "prioritize the order and call the customer",
        ),
    };

    DelayAnalysis {
        is_delayed: true,
        delay_minutes,
        severity,
        reason: format!("{reason}: {delay_minutes} minutes past the estimate"),
        suggested_action: Some(action.to_string()),
    }
}
