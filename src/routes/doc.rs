use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterStaffRequest},
        kitchen::{DelayedOrder, DelayedOrderList},
        menu::{CreateFoodItemRequest, MenuList, UpdateFoodItemRequest},
        orders::{
            AssignCourierRequest, OrderDetail, OrderEventList, OrderInsights, OrderList,
            PlaceOrderItem, PlaceOrderRequest, RecordPaymentRequest, SetPriorityRequest,
            UpdateStatusRequest,
        },
    },
    models::{OrderEvent, Staff, StaffRole},
    response::{ApiResponse, Meta},
    routes::{auth, health, kitchen, menu, orders, params, pricing},
    workflow::{
        CartItem, ComplexityAnalysis, DelayAnalysis, DeliveryEstimate, FoodCategory, FoodItem,
        KitchenPlan, KitchenStation, MinimumPayment, Order, OrderPriority, OrderStatus,
        OrderType, PaymentMethod, PaymentRequirements, PaymentStatus, PaymentStrategy,
        PricingSuggestion, StationAssignment,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register_staff,
        menu::list_menu,
        menu::create_menu_item,
        menu::update_menu_item,
        orders::list_orders,
        orders::place_order,
        orders::get_order,
        orders::update_status,
        orders::record_payment,
        orders::set_priority,
        orders::assign_courier,
        orders::delivery_estimate,
        orders::order_events,
        kitchen::kitchen_plan,
        kitchen::delayed_orders,
        pricing::payment_strategy,
        pricing::pricing_suggestion
    ),
    components(
        schemas(
            Staff,
            StaffRole,
            OrderEvent,
            FoodItem,
            FoodCategory,
            KitchenStation,
            CartItem,
            Order,
            OrderStatus,
            OrderType,
            OrderPriority,
            PaymentStatus,
            PaymentMethod,
            PaymentStrategy,
            PaymentRequirements,
            MinimumPayment,
            DelayAnalysis,
            ComplexityAnalysis,
            StationAssignment,
            DeliveryEstimate,
            KitchenPlan,
            PricingSuggestion,
            LoginRequest,
            LoginResponse,
            RegisterStaffRequest,
            CreateFoodItemRequest,
            UpdateFoodItemRequest,
            MenuList,
            PlaceOrderItem,
            PlaceOrderRequest,
            UpdateStatusRequest,
            RecordPaymentRequest,
            SetPriorityRequest,
            AssignCourierRequest,
            OrderInsights,
            OrderDetail,
            OrderList,
            OrderEventList,
            DelayedOrder,
            DelayedOrderList,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetail>,
            ApiResponse<KitchenPlan>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Staff login and registration"),
        (name = "Menu", description = "Menu endpoints"),
        (name = "Orders", description = "Order workflow endpoints"),
        (name = "Kitchen", description = "Kitchen planning endpoints"),
        (name = "Pricing", description = "Payment strategy and pricing advice"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
