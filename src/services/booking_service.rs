use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::bookings::{BookingList, BookingWithTable, CreateBookingRequest},
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings, Model as BookingModel},
        dining_tables::{ActiveModel as TableActive, Column as TableCol, Entity as DiningTables, Model as TableModel},
        enums::{BookingStatus, TableStatus},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Booking,
    response::{ApiResponse, Meta},
    routes::params::BookingQuery,
    services::{optional_text, require_positive, require_text, table_service::table_from_entity},
    state::AppState,
};

/// Books a table and marks it reserved, both in one transaction.
pub async fn create_booking(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<BookingWithTable>> {
    let customer_name = require_text(&payload.customer_name, "customer_name")?;
    let phone = require_text(&payload.phone, "phone")?;
    let guest_count = require_positive(payload.guest_count, "guest_count")?;

    let txn = state.db().begin().await?;

    let table = DiningTables::find_by_id(payload.table_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::BadRequest("table not found".to_string()))?;

    if guest_count > table.capacity {
        return Err(AppError::BadRequest(format!(
            "table {} seats at most {} guests",
            table.name, table.capacity
        )));
    }

    let now = Utc::now();
    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        table_id: Set(Some(table.id)),
        user_id: Set(user.user_id),
        table_name: Set(table.name.clone()),
        customer_name: Set(customer_name),
        phone: Set(phone),
        guest_count: Set(guest_count),
        booking_time: Set(payload.booking_time.into()),
        note: Set(optional_text(payload.note)),
        status: Set(BookingStatus::Confirmed),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let table = set_table_status(&txn, table, TableStatus::Reserved).await?;

    txn.commit().await?;

    tracing::info!(booking_id = %booking.id, table_id = %table.id, "table booked");
    audit::record(
        state.db(),
        Some(user.user_id),
        "booking_create",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "table_id": table.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking created",
        BookingWithTable {
            booking: booking_from_entity(booking),
            table: Some(table_from_entity(table)),
        },
        Some(Meta::empty()),
    ))
}

/// Cancels a booking and frees its table. The table is found by id, or by
/// the recorded name when the id was cleared.
pub async fn cancel_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<BookingWithTable>> {
    let txn = state.db().begin().await?;

    let booking = Bookings::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if !user.is_staff() && booking.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::BadRequest("Booking already cancelled".into()));
    }

    let mut active: BookingActive = booking.into();
    active.status = Set(BookingStatus::Cancelled);
    active.updated_at = Set(Utc::now().into());
    let booking = active.update(&txn).await?;

    let table = match booking.table_id {
        Some(table_id) => DiningTables::find_by_id(table_id).one(&txn).await?,
        None => {
            DiningTables::find()
                .filter(TableCol::Name.eq(booking.table_name.clone()))
                .one(&txn)
                .await?
        }
    };
    let table = match table {
        Some(table) => Some(set_table_status(&txn, table, TableStatus::Available).await?),
        None => {
            tracing::warn!(booking_id = %booking.id, table = %booking.table_name, "booked table no longer exists");
            None
        }
    };

    txn.commit().await?;

    tracing::info!(booking_id = %booking.id, "booking cancelled");
    audit::record(
        state.db(),
        Some(user.user_id),
        "booking_cancel",
        "bookings",
        serde_json::json!({ "booking_id": booking.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking cancelled",
        BookingWithTable {
            booking: booking_from_entity(booking),
            table: table.map(table_from_entity),
        },
        Some(Meta::empty()),
    ))
}

/// Staff see every booking; customers only their own.
pub async fn list_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingQuery,
) -> AppResult<ApiResponse<BookingList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if !user.is_staff() {
        condition = condition.add(BookingCol::UserId.eq(user.user_id));
    }
    if let Some(status) = query.status {
        condition = condition.add(BookingCol::Status.eq(status));
    }
    if let Some(table_id) = query.table_id {
        condition = condition.add(BookingCol::TableId.eq(table_id));
    }
    if let Some(phone) = query.phone.as_ref().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        condition = condition.add(BookingCol::Phone.eq(phone));
    }
    if let Some(from) = query.from {
        condition = condition.add(BookingCol::BookingTime.gte(from));
    }
    if let Some(to) = query.to {
        condition = condition.add(BookingCol::BookingTime.lte(to));
    }

    let finder = Bookings::find()
        .filter(condition)
        .order_by_asc(BookingCol::BookingTime);

    let total = finder.clone().count(state.db()).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Bookings", BookingList { items }, Some(meta)))
}

pub async fn get_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<BookingWithTable>> {
    let booking = Bookings::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;
    if !user.is_staff() && booking.user_id != user.user_id {
        return Err(AppError::NotFound);
    }

    let table = match booking.table_id {
        Some(table_id) => DiningTables::find_by_id(table_id)
            .one(state.db())
            .await?
            .map(table_from_entity),
        None => None,
    };

    Ok(ApiResponse::success(
        "Booking",
        BookingWithTable {
            booking: booking_from_entity(booking),
            table,
        },
        Some(Meta::empty()),
    ))
}

async fn set_table_status<C>(conn: &C, table: TableModel, status: TableStatus) -> AppResult<TableModel>
where
    C: ConnectionTrait,
{
    let mut active: TableActive = table.into();
    active.status = Set(status);
    Ok(active.update(conn).await?)
}

fn booking_from_entity(model: BookingModel) -> Booking {
    Booking {
        id: model.id,
        table_id: model.table_id,
        user_id: model.user_id,
        table_name: model.table_name,
        customer_name: model.customer_name,
        phone: model.phone,
        guest_count: model.guest_count,
        booking_time: model.booking_time.with_timezone(&Utc),
        note: model.note,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
