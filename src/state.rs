use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use crate::{
    config::WorkflowSettings,
    error::AppResult,
    sequence::OrderSequence,
    store::OrderStore,
    workflow::{EstimateContext, OrderStatus},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub sequence: Arc<OrderSequence>,
    pub workflow: WorkflowSettings,
}

impl AppState {
    /// Builds the state and seeds the order number sequence from the store.
    pub async fn new(store: Arc<dyn OrderStore>, workflow: WorkflowSettings) -> AppResult<Self> {
        let last = store.max_order_number().await?;
        tracing::debug!(last_order_number = last, "order sequence seeded");
        Ok(Self {
            store,
            sequence: Arc::new(OrderSequence::starting_after(last)),
            workflow,
        })
    }

    /// Restaurant wall-clock time for `now`.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.workflow.utc_offset).naive_local()
    }

    /// Estimate inputs for `now`: local hour and the current kitchen load.
    pub async fn estimate_context(&self, now: DateTime<Utc>) -> AppResult<EstimateContext> {
        let active = self
            .store
            .orders_in_status(&[OrderStatus::Confirmed, OrderStatus::Preparing])
            .await?
            .len();
        Ok(EstimateContext::at(now)
            .with_hour(self.local_time(now).hour())
            .with_kitchen_load(self.workflow.kitchen_load(active)))
    }
}
