use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    analytics,
    audit,
    dto::tables::{CreateTableRequest, TableBoard, UpdateTableRequest},
    entity::{
        dining_tables::{ActiveModel as TableActive, Column as TableCol, Entity as DiningTables, Model as TableModel},
        enums::TableStatus,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::DiningTable,
    response::{ApiResponse, Meta},
    services::{optional_text, require_positive, require_text},
    state::AppState,
};

/// All tables (optionally only those in `status`) with counts over the
/// whole floor.
pub async fn table_board(
    state: &AppState,
    status: Option<TableStatus>,
) -> AppResult<ApiResponse<TableBoard>> {
    let all: Vec<DiningTable> = DiningTables::find()
        .order_by_asc(TableCol::Name)
        .all(state.db())
        .await?
        .into_iter()
        .map(table_from_entity)
        .collect();

    let counts = analytics::count_tables(&all);
    let tables = analytics::filter_tables(all, status);
    let meta = Meta::unpaged(tables.len());

    Ok(ApiResponse::success(
        "Tables",
        TableBoard { tables, counts },
        Some(meta),
    ))
}

pub async fn get_table(state: &AppState, id: Uuid) -> AppResult<ApiResponse<DiningTable>> {
    let table = DiningTables::find_by_id(id)
        .one(state.db())
        .await?
        .map(table_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Table", table, None))
}

pub async fn create_table(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTableRequest,
) -> AppResult<ApiResponse<DiningTable>> {
    ensure_admin(user)?;
    let name = require_text(&payload.name, "name")?;
    let capacity = require_positive(payload.capacity, "capacity")?;
    ensure_name_free(state, &name, None).await?;

    let table = TableActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        capacity: Set(capacity),
        status: Set(TableStatus::Available),
        image_url: Set(optional_text(payload.image_url)),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "table_create",
        "dining_tables",
        serde_json::json!({ "table_id": table.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Table created",
        table_from_entity(table),
        Some(Meta::empty()),
    ))
}

pub async fn update_table(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateTableRequest,
) -> AppResult<ApiResponse<DiningTable>> {
    ensure_admin(user)?;
    let existing = DiningTables::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: TableActive = existing.into();
    if let Some(name) = payload.name {
        let name = require_text(&name, "name")?;
        ensure_name_free(state, &name, Some(id)).await?;
        active.name = Set(name);
    }
    if let Some(capacity) = payload.capacity {
        active.capacity = Set(require_positive(capacity, "capacity")?);
    }
    if payload.image_url.is_some() {
        active.image_url = Set(optional_text(payload.image_url));
    }
    let table = active.update(state.db()).await?;

    Ok(ApiResponse::success(
        "Updated",
        table_from_entity(table),
        Some(Meta::empty()),
    ))
}

/// Writes the status as given; any state may follow any other.
pub async fn update_table_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    status: TableStatus,
) -> AppResult<ApiResponse<DiningTable>> {
    ensure_staff(user)?;
    let existing = DiningTables::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let previous = existing.status;

    let mut active: TableActive = existing.into();
    active.status = Set(status);
    let table = active.update(state.db()).await?;

    tracing::info!(table_id = %table.id, from = ?previous, to = ?status, "table status changed");
    audit::record(
        state.db(),
        Some(user.user_id),
        "table_status_update",
        "dining_tables",
        serde_json::json!({ "table_id": table.id, "status": status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Table status updated",
        table_from_entity(table),
        Some(Meta::empty()),
    ))
}

/// Removes a table; bookings, reservations and orders keep their rows with
/// the table reference cleared.
pub async fn delete_table(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = DiningTables::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "table_delete",
        "dining_tables",
        serde_json::json!({ "table_id": id }),
    )
    .await;

    Ok(ApiResponse::done("Deleted"))
}

async fn ensure_name_free(state: &AppState, name: &str, except: Option<Uuid>) -> AppResult<()> {
    let taken = DiningTables::find()
        .filter(TableCol::Name.eq(name))
        .one(state.db())
        .await?;
    match taken {
        Some(t) if Some(t.id) != except => {
            Err(AppError::Conflict(format!("table {name} already exists")))
        }
        _ => Ok(()),
    }
}

pub(crate) fn table_from_entity(model: TableModel) -> DiningTable {
    DiningTable {
        id: model.id,
        name: model.name,
        capacity: model.capacity,
        status: model.status,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
