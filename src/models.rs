use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::workflow::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Cashier,
    Waiter,
    Kitchen,
    Courier,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Cashier => "cashier",
            StaffRole::Waiter => "waiter",
            StaffRole::Kitchen => "kitchen",
            StaffRole::Courier => "courier",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(StaffRole::Admin),
            "cashier" => Ok(StaffRole::Cashier),
            "waiter" => Ok(StaffRole::Waiter),
            "kitchen" => Ok(StaffRole::Kitchen),
            "courier" => Ok(StaffRole::Courier),
            other => Err(UnknownVariant {
                kind: "StaffRole",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Staff {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
}

/// One entry of an order's audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderEvent {
    pub id: Uuid,
    pub order_id: Uuid,
    pub staff_id: Option<Uuid>,
    pub action: String,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl OrderEvent {
    pub fn new(
        order_id: Uuid,
        staff_id: Option<Uuid>,
        action: &str,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            staff_id,
            action: action.to_string(),
            metadata,
            created_at: Utc::now(),
        }
    }
}
