//! Kitchen dashboard planning: queue order, station buckets, batching and
//! bottleneck warnings over the orders currently in the kitchen.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::model::{KitchenStation, Order, OrderPriority, OrderStatus, OrderType, Suggestion};

/// Orders cooked side by side. Not derived from station capacity.
pub const PARALLEL_BATCH_SIZE: usize = 3;

const GRILL_BOTTLENECK_THRESHOLD: usize = 5;
const GRILL_MINUTES_PER_EXTRA_ORDER: i64 = 3;
const PREP_BOTTLENECK_THRESHOLD: usize = 8;
const PREP_MINUTES_PER_EXTRA_ORDER: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QueueEntry {
    pub order_id: Uuid,
    pub order_number: i64,
    pub priority: OrderPriority,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub item_count: u32,
    pub table_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub estimated_ready_time: Option<DateTime<Utc>>,
}

impl From<&Order> for QueueEntry {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            order_number: order.order_number,
            priority: order.priority,
            status: order.status,
            order_type: order.order_type,
            item_count: order.item_count(),
            table_name: order.table_name.clone(),
            created_at: order.created_at,
            estimated_ready_time: order.estimated_ready_time,
        }
    }
}

/// Order ids per kitchen station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StationBuckets {
    pub grill: Vec<Uuid>,
    pub prep: Vec<Uuid>,
    pub cold: Vec<Uuid>,
    pub finisher: Vec<Uuid>,
}

impl StationBuckets {
    fn bucket_mut(&mut self, station: KitchenStation) -> &mut Vec<Uuid> {
        match station {
            KitchenStation::Grill => &mut self.grill,
            KitchenStation::Prep => &mut self.prep,
            KitchenStation::Cold => &mut self.cold,
            KitchenStation::Finisher => &mut self.finisher,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Bottleneck {
    pub station: KitchenStation,
    pub order_count: usize,
    pub expected_delay_minutes: i64,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct KitchenPlan {
    pub priority_queue: Vec<QueueEntry>,
    pub parallel_groups: Vec<Vec<Uuid>>,
    pub estimated_throughput_minutes: i64,
    pub station_assignments: StationBuckets,
    pub bottlenecks: Vec<Bottleneck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StationAssignment {
    pub primary: KitchenStation,
    pub stations: Vec<KitchenStation>,
}

/// Stations an order needs, in pipeline order, always ending at the finisher.
pub fn order_stations(order: &Order) -> Vec<KitchenStation> {
    let mut stations: Vec<KitchenStation> = order
        .items
        .iter()
        .map(|item| item.category.station())
        .collect();
    stations.push(KitchenStation::Finisher);
    stations.sort();
    stations.dedup();
    stations
}

/// The primary station is the one carrying the most preparation minutes.
pub fn assign_kitchen_station(order: &Order) -> StationAssignment {
    let stations = order_stations(order);
    let load = |station: KitchenStation| -> u32 {
        order
            .items
            .iter()
            .filter(|item| item.category.station() == station)
            .map(|item| item.base_minutes())
            .fold(0, u32::saturating_add)
    };

    let mut primary = KitchenStation::Finisher;
    let mut best = 0;
    for station in [KitchenStation::Grill, KitchenStation::Prep, KitchenStation::Cold] {
        let minutes = load(station);
        if minutes > best {
            primary = station;
            best = minutes;
        }
    }

    StationAssignment { primary, stations }
}

pub fn kitchen_workflow_plan(orders: &[Order]) -> KitchenPlan {
    let mut queue: Vec<&Order> = orders.iter().filter(|o| o.status.is_in_kitchen()).collect();
    queue.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then(a.created_at.cmp(&b.created_at))
    });

    let mut buckets = StationBuckets::default();
    for order in &queue {
        for station in order_stations(order) {
            buckets.bucket_mut(station).push(order.id);
        }
    }

    let parallel_groups: Vec<Vec<Uuid>> = queue
        .chunks(PARALLEL_BATCH_SIZE)
        .map(|group| group.iter().map(|order| order.id).collect::<Vec<_>>())
        .collect();

    let estimated_throughput_minutes = [
        buckets.grill.len() as i64 * 5,
        buckets.prep.len() as i64 * 3,
        buckets.cold.len() as i64,
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let bottlenecks = detect_bottlenecks(&buckets);

    KitchenPlan {
        priority_queue: queue.into_iter().map(QueueEntry::from).collect(),
        parallel_groups,
        estimated_throughput_minutes,
        station_assignments: buckets,
        bottlenecks,
    }
}

fn detect_bottlenecks(buckets: &StationBuckets) -> Vec<Bottleneck> {
    let mut bottlenecks = Vec::new();

    let grill = buckets.grill.len();
    if grill > GRILL_BOTTLENECK_THRESHOLD {
        bottlenecks.push(Bottleneck {
            station: KitchenStation::Grill,
            order_count: grill,
            expected_delay_minutes: (grill - GRILL_BOTTLENECK_THRESHOLD) as i64
                * GRILL_MINUTES_PER_EXTRA_ORDER,
            suggestion: Suggestion::new(
                "grill_overloaded",
                "Move a cook to the grill or pause grill-heavy items",
            ),
        });
    }

    let prep = buckets.prep.len();
    if prep > PREP_BOTTLENECK_THRESHOLD {
        bottlenecks.push(Bottleneck {
            station: KitchenStation::Prep,
            order_count: prep,
            expected_delay_minutes: (prep - PREP_BOTTLENECK_THRESHOLD) as i64
                * PREP_MINUTES_PER_EXTRA_ORDER,
            suggestion: Suggestion::new(
                "prep_overloaded",
                "Add help on the prep line and batch similar items",
            ),
        });
    }

    bottlenecks
}
