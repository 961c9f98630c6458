use sea_orm::entity::prelude::*;

use super::enums::BookingStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub table_id: Option<Uuid>,
    /// Account that made the booking.
    pub user_id: Uuid,
    /// Copied from the table at booking time so the booking stays readable
    /// after the table is deleted.
    pub table_name: String,
    pub customer_name: String,
    pub phone: String,
    pub guest_count: i32,
    pub booking_time: DateTimeWithTimeZone,
    pub note: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dining_tables::Entity",
        from = "Column::TableId",
        to = "super::dining_tables::Column::Id",
        on_delete = "SetNull"
    )]
    DiningTables,
}

impl Related<super::dining_tables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiningTables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
