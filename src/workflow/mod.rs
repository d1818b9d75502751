//! Order workflow rules. Everything in here is pure: callers pass the
//! current time and kitchen state in, nothing is read from or written to
//! storage.

pub mod complexity;
pub mod delay;
pub mod kitchen;
pub mod model;
pub mod payment;
pub mod pricing;
pub mod priority;
pub mod timing;
pub mod transitions;

pub use complexity::{ComplexityAnalysis, ComplexityLevel, analyze_complexity};
pub use delay::{DelayAnalysis, DelaySeverity, analyze_delay};
pub use kitchen::{KitchenPlan, StationAssignment, assign_kitchen_station, kitchen_workflow_plan};
pub use model::{
    CartItem, CookingTechnique, FoodCategory, FoodItem, KitchenStation, MAX_LINE_QUANTITY, Order,
    OrderPriority, OrderStatus, OrderType, PaymentMethod, PaymentStatus, Suggestion,
    UnknownVariant,
};
pub use payment::{
    MinimumPayment, PaymentRequirements, PaymentStrategy, PaymentTiming, apply_payment,
    minimum_payment, payment_requirements, payment_strategy, validate_payment,
};
pub use pricing::{PricingSuggestion, dynamic_pricing_suggestion};
pub use priority::{calculate_order_priority, escalated_priority};
pub use timing::{
    DeliveryEstimate, EstimateContext, PreparationEstimate, delivery_time_estimate,
    estimated_preparation_minutes,
};
pub use transitions::{apply_transition, is_valid_transition, next_possible_statuses};
