use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{OrderFilter, OrderStore};
use crate::{
    audit::{list_order_events, log_order_event},
    db::{DbPool, OrmConn},
    entity::{
        food_items::{ActiveModel as FoodActive, Column as FoodCol, Entity as FoodItems, Model as FoodModel},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems, Model as OrderItemModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        staff::{ActiveModel as StaffActive, Column as StaffCol, Entity as StaffMembers, Model as StaffModel},
    },
    error::{AppError, AppResult},
    models::{OrderEvent, Staff},
    routes::params::SortOrder,
    workflow::{CartItem, FoodItem, Order, OrderStatus},
};

/// Postgres-backed store: sea-orm for entities, the raw pool for the audit trail.
#[derive(Clone)]
pub struct PgStore {
    orm: OrmConn,
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            orm: crate::db::create_orm_conn(pool.clone()),
            pool,
        }
    }

    async fn hydrate(&self, rows: Vec<OrderModel>) -> AppResult<Vec<Order>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut items_by_order: HashMap<Uuid, Vec<OrderItemModel>> = HashMap::new();
        for item in OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(ids))
            .order_by_asc(OrderItemCol::Position)
            .all(&self.orm)
            .await?
        {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                order_from_entity(row, items)
            })
            .collect()
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn list_orders(&self, filter: &OrderFilter) -> AppResult<(Vec<Order>, u64)> {
        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(OrderCol::Status.eq(status.as_str()));
        }
        if let Some(order_type) = filter.order_type {
            condition = condition.add(OrderCol::OrderType.eq(order_type.as_str()));
        }

        let mut finder = Orders::find().filter(condition);
        finder = match filter.sort_order {
            SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
            SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
        };

        let total = finder.clone().count(&self.orm).await?;
        let rows = finder
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.orm)
            .await?;

        Ok((self.hydrate(rows).await?, total))
    }

    async fn orders_in_status(&self, statuses: &[OrderStatus]) -> AppResult<Vec<Order>> {
        let rows = Orders::find()
            .filter(OrderCol::Status.is_in(statuses.iter().map(|s| s.as_str())))
            .order_by_asc(OrderCol::CreatedAt)
            .all(&self.orm)
            .await?;
        self.hydrate(rows).await
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Option<Order>> {
        let row = Orders::find_by_id(id).one(&self.orm).await?;
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn save_order(&self, order: &Order) -> AppResult<()> {
        let txn = self.orm.begin().await?;

        let exists = Orders::find_by_id(order.id).one(&txn).await?.is_some();
        let active = order_to_active(order);
        if exists {
            active.update(&txn).await?;
        } else {
            active.insert(&txn).await?;
            let items = order
                .items
                .iter()
                .enumerate()
                .map(|(position, item)| OrderItemActive {
                    id: Set(Uuid::new_v4()),
                    order_id: Set(order.id),
                    position: Set(position as i32),
                    food_item_id: Set(item.food_item_id),
                    name: Set(item.name.clone()),
                    category: Set(item.category.as_str().to_string()),
                    unit_price: Set(item.unit_price),
                    quantity: Set(i32::try_from(item.quantity).unwrap_or(i32::MAX)),
                    note: Set(item.note.clone()),
                })
                .collect::<Vec<_>>();
            if !items.is_empty() {
                OrderItems::insert_many(items).exec(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }

    async fn max_order_number(&self) -> AppResult<i64> {
        let max = Orders::find()
            .select_only()
            .column_as(OrderCol::OrderNumber.max(), "max_number")
            .into_tuple::<Option<i64>>()
            .one(&self.orm)
            .await?;
        Ok(max.flatten().unwrap_or(0))
    }

    async fn record_event(&self, event: &OrderEvent) -> AppResult<()> {
        log_order_event(&self.pool, event).await
    }

    async fn order_events(&self, order_id: Uuid) -> AppResult<Vec<OrderEvent>> {
        list_order_events(&self.pool, order_id).await
    }

    async fn list_food_items(&self) -> AppResult<Vec<FoodItem>> {
        FoodItems::find()
            .order_by_asc(FoodCol::Category)
            .order_by_asc(FoodCol::Name)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(food_item_from_entity)
            .collect()
    }

    async fn food_items_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<FoodItem>> {
        FoodItems::find()
            .filter(FoodCol::Id.is_in(ids.iter().copied()))
            .all(&self.orm)
            .await?
            .into_iter()
            .map(food_item_from_entity)
            .collect()
    }

    async fn save_food_item(&self, item: &FoodItem) -> AppResult<()> {
        let active = FoodActive {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            category: Set(item.category.as_str().to_string()),
            price: Set(item.price),
            available: Set(item.available),
            created_at: Set(item.created_at.into()),
        };
        if FoodItems::find_by_id(item.id).one(&self.orm).await?.is_some() {
            active.update(&self.orm).await?;
        } else {
            active.insert(&self.orm).await?;
        }
        Ok(())
    }

    async fn find_staff_by_email(&self, email: &str) -> AppResult<Option<Staff>> {
        StaffMembers::find()
            .filter(StaffCol::Email.eq(email.to_lowercase()))
            .one(&self.orm)
            .await?
            .map(staff_from_entity)
            .transpose()
    }

    async fn get_staff(&self, id: Uuid) -> AppResult<Option<Staff>> {
        StaffMembers::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(staff_from_entity)
            .transpose()
    }

    async fn insert_staff(&self, staff: &Staff) -> AppResult<()> {
        let taken = StaffMembers::find()
            .filter(StaffCol::Email.eq(staff.email.to_lowercase()))
            .one(&self.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }

        StaffActive {
            id: Set(staff.id),
            email: Set(staff.email.to_lowercase()),
            name: Set(staff.name.clone()),
            password_hash: Set(staff.password_hash.clone()),
            role: Set(staff.role.as_str().to_string()),
            created_at: Set(staff.created_at.into()),
        }
        .insert(&self.orm)
        .await?;
        Ok(())
    }
}

fn order_to_active(order: &Order) -> OrderActive {
    OrderActive {
        id: Set(order.id),
        order_number: Set(order.order_number),
        order_type: Set(order.order_type.as_str().to_string()),
        status: Set(order.status.as_str().to_string()),
        payment_status: Set(order.payment_status.as_str().to_string()),
        payment_method: Set(order.payment_method.map(|m| m.as_str().to_string())),
        priority: Set(order.priority.as_str().to_string()),
        total: Set(order.total),
        paid_amount: Set(order.paid_amount),
        table_id: Set(order.table_id.clone()),
        table_name: Set(order.table_name.clone()),
        customer_name: Set(order.customer_name.clone()),
        notes: Set(order.notes.clone()),
        delivery_address: Set(order.delivery_address.clone()),
        courier_id: Set(order.courier_id),
        confirmed_at: Set(order.confirmed_at.map(Into::into)),
        prepared_at: Set(order.prepared_at.map(Into::into)),
        served_at: Set(order.served_at.map(Into::into)),
        completed_at: Set(order.completed_at.map(Into::into)),
        estimated_ready_time: Set(order.estimated_ready_time.map(Into::into)),
        estimated_delivery_time: Set(order.estimated_delivery_time.map(Into::into)),
        created_at: Set(order.created_at.into()),
        updated_at: Set(order.updated_at.into()),
    }
}

fn order_from_entity(model: OrderModel, items: Vec<OrderItemModel>) -> AppResult<Order> {
    let items = items
        .into_iter()
        .map(|item| -> AppResult<CartItem> {
            Ok(CartItem {
                food_item_id: item.food_item_id,
                name: item.name,
                category: item.category.parse()?,
                unit_price: item.unit_price,
                quantity: item.quantity.max(0) as u32,
                note: item.note,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Order {
        id: model.id,
        order_number: model.order_number,
        items,
        total: model.total,
        paid_amount: model.paid_amount,
        status: model.status.parse()?,
        order_type: model.order_type.parse()?,
        payment_status: model.payment_status.parse()?,
        payment_method: model.payment_method.map(|m| m.parse()).transpose()?,
        priority: model.priority.parse()?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        confirmed_at: model.confirmed_at.map(|dt| dt.with_timezone(&Utc)),
        prepared_at: model.prepared_at.map(|dt| dt.with_timezone(&Utc)),
        served_at: model.served_at.map(|dt| dt.with_timezone(&Utc)),
        completed_at: model.completed_at.map(|dt| dt.with_timezone(&Utc)),
        estimated_ready_time: model.estimated_ready_time.map(|dt| dt.with_timezone(&Utc)),
        estimated_delivery_time: model.estimated_delivery_time.map(|dt| dt.with_timezone(&Utc)),
        table_id: model.table_id,
        table_name: model.table_name,
        customer_name: model.customer_name,
        notes: model.notes,
        delivery_address: model.delivery_address,
        courier_id: model.courier_id,
    })
}

fn food_item_from_entity(model: FoodModel) -> AppResult<FoodItem> {
    Ok(FoodItem {
        id: model.id,
        name: model.name,
        description: model.description,
        category: model.category.parse()?,
        price: model.price,
        available: model.available,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn staff_from_entity(model: StaffModel) -> AppResult<Staff> {
    Ok(Staff {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        role: model.role.parse()?,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
