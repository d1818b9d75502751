use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::workflow::{OrderStatus, OrderType};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl Pagination {
    /// (page, per_page, offset) with page >= 1 and per_page in 1..=100.
    pub fn normalize(&self) -> (u64, u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Page number, default 1
    pub page: Option<u64>,
    /// Items per page, default 20
    pub per_page: Option<u64>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    /// Sort by creation time, default desc
    pub sort_order: Option<SortOrder>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeliveryEstimateQuery {
    pub distance_km: f64,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PricingQuery {
    /// Order total in minor currency units
    pub total: i64,
    /// Restaurant-local time, `YYYY-MM-DDTHH:MM:SS`; defaults to now
    pub at: Option<chrono::NaiveDateTime>,
}
