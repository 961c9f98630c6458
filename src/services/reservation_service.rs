use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::reservations::{CreateReservationRequest, ReservationList},
    entity::{
        dining_tables::Entity as DiningTables,
        reservations::{
            ActiveModel as ReservationActive, Column as ReservationCol, Entity as Reservations,
            Model as ReservationModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Reservation,
    response::{ApiResponse, Meta},
    routes::params::ReservationQuery,
    services::{optional_text, require_positive, require_text},
    state::AppState,
};

/// Records a reservation taken by staff. Table status is left untouched.
pub async fn create_reservation(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReservationRequest,
) -> AppResult<ApiResponse<Reservation>> {
    ensure_staff(user)?;
    let customer_name = require_text(&payload.customer_name, "customer_name")?;
    let phone = require_text(&payload.phone, "phone")?;
    let guest_count = require_positive(payload.guest_count, "guest_count")?;

    if let Some(table_id) = payload.table_id {
        let table = DiningTables::find_by_id(table_id).one(state.db()).await?;
        if table.is_none() {
            return Err(AppError::BadRequest("table not found".to_string()));
        }
    }

    let reservation = ReservationActive {
        id: Set(Uuid::new_v4()),
        table_id: Set(payload.table_id),
        customer_name: Set(customer_name),
        phone: Set(phone),
        guest_count: Set(guest_count),
        reserved_at: Set(payload.reserved_at.into()),
        note: Set(optional_text(payload.note)),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "reservation_create",
        "reservations",
        serde_json::json!({ "reservation_id": reservation.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Reservation created",
        reservation_from_entity(reservation),
        Some(Meta::empty()),
    ))
}

pub async fn list_reservations(
    state: &AppState,
    user: &AuthUser,
    query: ReservationQuery,
) -> AppResult<ApiResponse<ReservationList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(table_id) = query.table_id {
        condition = condition.add(ReservationCol::TableId.eq(table_id));
    }
    if let Some(from) = query.from {
        condition = condition.add(ReservationCol::ReservedAt.gte(from));
    }
    if let Some(to) = query.to {
        condition = condition.add(ReservationCol::ReservedAt.lte(to));
    }

    let finder = Reservations::find()
        .filter(condition)
        .order_by_asc(ReservationCol::ReservedAt);
    let total = finder.clone().count(state.db()).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(reservation_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Reservations",
        ReservationList { items },
        Some(meta),
    ))
}

pub async fn get_reservation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Reservation>> {
    ensure_staff(user)?;
    let reservation = Reservations::find_by_id(id)
        .one(state.db())
        .await?
        .map(reservation_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Reservation", reservation, None))
}

pub async fn delete_reservation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Reservations::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "reservation_delete",
        "reservations",
        serde_json::json!({ "reservation_id": id }),
    )
    .await;

    Ok(ApiResponse::done("Deleted"))
}

fn reservation_from_entity(model: ReservationModel) -> Reservation {
    Reservation {
        id: model.id,
        table_id: model.table_id,
        customer_name: model.customer_name,
        phone: model.phone,
        guest_count: model.guest_count,
        reserved_at: model.reserved_at.with_timezone(&Utc),
        note: model.note,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
