use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Returned when a stored or submitted value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// Stored columns hold the same SCREAMING_SNAKE_CASE text serde produces.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingConfirmation,
    Confirmed,
    ReadyForPayment,
    Preparing,
    ReadyForService,
    OutForDelivery,
    Served,
    Paid,
    Completed,
    Cancelled,
}

text_enum!(OrderStatus {
    PendingConfirmation => "PENDING_CONFIRMATION",
    Confirmed => "CONFIRMED",
    ReadyForPayment => "READY_FOR_PAYMENT",
    Preparing => "PREPARING",
    ReadyForService => "READY_FOR_SERVICE",
    OutForDelivery => "OUT_FOR_DELIVERY",
    Served => "SERVED",
    Paid => "PAID",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
});

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Orders the kitchen is expected to be working on.
    pub fn is_in_kitchen(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Preparing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

text_enum!(OrderType {
    DineIn => "DINE_IN",
    Takeaway => "TAKEAWAY",
    Delivery => "DELIVERY",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
}

text_enum!(PaymentStatus {
    Pending => "PENDING",
    Partial => "PARTIAL",
    Paid => "PAID",
    Refunded => "REFUNDED",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    MealCard,
    Online,
}

text_enum!(PaymentMethod {
    Cash => "CASH",
    Card => "CARD",
    MealCard => "MEAL_CARD",
    Online => "ONLINE",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPriority {
    Low,
    Normal,
    High,
    Urgent,
}

text_enum!(OrderPriority {
    Low => "LOW",
    Normal => "NORMAL",
    High => "HIGH",
    Urgent => "URGENT",
});

impl OrderPriority {
    /// Higher rank is served first.
    pub fn rank(&self) -> u8 {
        match self {
            OrderPriority::Low => 0,
            OrderPriority::Normal => 1,
            OrderPriority::High => 2,
            OrderPriority::Urgent => 3,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodCategory {
    Pizza,
    Burger,
    Salad,
    Dessert,
    Drink,
    Meat,
    Chicken,
    Other,
}

text_enum!(FoodCategory {
    Pizza => "PIZZA",
    Burger => "BURGER",
    Salad => "SALAD",
    Dessert => "DESSERT",
    Drink => "DRINK",
    Meat => "MEAT",
    Chicken => "CHICKEN",
    Other => "OTHER",
});

impl FoodCategory {
    /// Minutes of kitchen work for a single portion.
    pub fn base_minutes(&self) -> u32 {
        match self {
            FoodCategory::Pizza => 15,
            FoodCategory::Burger => 8,
            FoodCategory::Salad => 3,
            FoodCategory::Dessert => 2,
            FoodCategory::Drink => 1,
            FoodCategory::Meat => 12,
            FoodCategory::Chicken => 10,
            FoodCategory::Other => 4,
        }
    }

    pub fn station(&self) -> KitchenStation {
        match self {
            FoodCategory::Burger | FoodCategory::Meat | FoodCategory::Chicken => {
                KitchenStation::Grill
            }
            FoodCategory::Pizza | FoodCategory::Other => KitchenStation::Prep,
            FoodCategory::Salad | FoodCategory::Dessert | FoodCategory::Drink => {
                KitchenStation::Cold
            }
        }
    }

    pub fn technique(&self) -> CookingTechnique {
        match self {
            FoodCategory::Burger | FoodCategory::Meat => CookingTechnique::Grilling,
            FoodCategory::Chicken => CookingTechnique::Frying,
            FoodCategory::Pizza => CookingTechnique::Baking,
            FoodCategory::Dessert => CookingTechnique::Pastry,
            FoodCategory::Salad => CookingTechnique::ColdAssembly,
            FoodCategory::Drink => CookingTechnique::Beverage,
            FoodCategory::Other => CookingTechnique::General,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenStation {
    Grill,
    Prep,
    Cold,
    Finisher,
}

text_enum!(KitchenStation {
    Grill => "GRILL",
    Prep => "PREP",
    Cold => "COLD",
    Finisher => "FINISHER",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingTechnique {
    Grilling,
    Frying,
    Baking,
    Pastry,
    ColdAssembly,
    Beverage,
    General,
}

/// Largest quantity accepted on a single order line.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// A line of an order. Name, category and price are copied from the menu
/// when the order is placed so later menu edits never change an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub food_item_id: Uuid,
    pub name: String,
    pub category: FoodCategory,
    pub unit_price: i64,
    pub quantity: u32,
    pub note: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }

    pub fn base_minutes(&self) -> u32 {
        self.category.base_minutes().saturating_mul(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: i64,
    pub items: Vec<CartItem>,
    /// Minor currency units.
    pub total: i64,
    pub paid_amount: i64,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub priority: OrderPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub prepared_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub estimated_ready_time: Option<DateTime<Utc>>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub table_id: Option<String>,
    pub table_name: Option<String>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub delivery_address: Option<String>,
    pub courier_id: Option<Uuid>,
}

impl Order {
    /// A freshly placed order: awaiting confirmation, nothing paid.
    pub fn new(
        id: Uuid,
        order_number: i64,
        order_type: OrderType,
        items: Vec<CartItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let total = items
            .iter()
            .map(CartItem::line_total)
            .fold(0, i64::saturating_add);
        Self {
            id,
            order_number,
            items,
            total,
            paid_amount: 0,
            status: OrderStatus::PendingConfirmation,
            order_type,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            priority: OrderPriority::Normal,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            prepared_at: None,
            served_at: None,
            completed_at: None,
            estimated_ready_time: None,
            estimated_delivery_time: None,
            table_id: None,
            table_name: None,
            customer_name: None,
            notes: None,
            delivery_address: None,
            courier_id: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn outstanding(&self) -> i64 {
        (self.total - self.paid_amount).max(0)
    }

    /// Total number of portions across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity)
            .fold(0, u32::saturating_add)
    }

    pub fn categories(&self) -> BTreeSet<FoodCategory> {
        self.items.iter().map(|item| item.category).collect()
    }

    pub fn techniques(&self) -> BTreeSet<CookingTechnique> {
        self.items.iter().map(|item| item.category.technique()).collect()
    }

    pub fn has_special_instructions(&self) -> bool {
        let filled = |text: &Option<String>| text.as_deref().is_some_and(|t| !t.trim().is_empty());
        filled(&self.notes) || self.items.iter().any(|item| filled(&item.note))
    }

    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_minutes()
    }
}

/// Menu entry the cart items are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: FoodCategory,
    pub price: i64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Advisory text attached to an analysis. Never acted on automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Suggestion {
    pub code: String,
    pub message: String,
}

impl Suggestion {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
