use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult, models::OrderEvent};

#[derive(sqlx::FromRow)]
struct OrderEventRow {
    id: Uuid,
    order_id: Uuid,
    staff_id: Option<Uuid>,
    action: String,
    metadata: Option<Value>,
    created_at: DateTime<Utc>,
}

pub async fn log_order_event(pool: &DbPool, event: &OrderEvent) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_events (id, order_id, staff_id, action, metadata, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(event.id)
    .bind(event.order_id)
    .bind(event.staff_id)
    .bind(event.action.as_str())
    .bind(&event.metadata)
    .bind(event.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_order_events(pool: &DbPool, order_id: Uuid) -> AppResult<Vec<OrderEvent>> {
    let rows = sqlx::query_as::<_, OrderEventRow>(
        r#"
        SELECT id, order_id, staff_id, action, metadata, created_at
        FROM order_events
        WHERE order_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| OrderEvent {
            id: row.id,
            order_id: row.order_id,
            staff_id: row.staff_id,
            action: row.action,
            metadata: row.metadata.unwrap_or(Value::Null),
            created_at: row.created_at,
        })
        .collect())
}
