use chrono::{DateTime, Utc};
use sea_orm::EntityTrait;

use crate::{
    analytics,
    dto::dashboard::DashboardSnapshot,
    entity::dining_tables::Entity as DiningTables,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::DiningTable,
    response::{ApiResponse, Meta},
    services::{
        menu_service::{DEFAULT_POPULAR_LIMIT, top_menu_items},
        order_service::order_history,
        table_service::table_from_entity,
    },
    state::AppState,
};

/// Revenue, occupancy and best sellers as of `at` (now by default).
pub async fn dashboard(
    state: &AppState,
    user: &AuthUser,
    at: Option<DateTime<Utc>>,
) -> AppResult<ApiResponse<DashboardSnapshot>> {
    ensure_admin(user)?;
    let now = at.unwrap_or_else(Utc::now);

    let orders = order_history(state.db()).await?;
    let tables: Vec<DiningTable> = DiningTables::find()
        .all(state.db())
        .await?
        .into_iter()
        .map(table_from_entity)
        .collect();
    let top_menu_items = top_menu_items(state, DEFAULT_POPULAR_LIMIT).await?;

    let revenue = analytics::revenue_report(&orders, now);
    tracing::debug!(
        orders = orders.len(),
        total_revenue = revenue.total_revenue,
        "dashboard computed"
    );

    Ok(ApiResponse::success(
        "Dashboard",
        DashboardSnapshot {
            generated_at: now,
            revenue,
            tables: analytics::count_tables(&tables),
            top_menu_items,
        },
        Some(Meta::empty()),
    ))
}
