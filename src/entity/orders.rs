use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: i64,
    pub order_type: String,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub priority: String,
    pub total: i64,
    pub paid_amount: i64,
    pub table_id: Option<String>,
    pub table_name: Option<String>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub delivery_address: Option<String>,
    pub courier_id: Option<Uuid>,
    pub confirmed_at: Option<DateTimeWithTimeZone>,
    pub prepared_at: Option<DateTimeWithTimeZone>,
    pub served_at: Option<DateTimeWithTimeZone>,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub estimated_ready_time: Option<DateTimeWithTimeZone>,
    pub estimated_delivery_time: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::CourierId",
        to = "super::staff::Column::Id"
    )]
    Courier,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courier.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
