use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::dashboard::{DashboardQuery, DashboardSnapshot},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    params(
        ("at" = Option<String>, Query, description = "Reference time for the trailing windows (RFC 3339), default now")
    ),
    responses(
        (status = 200, description = "Revenue, profit, growth, loyal customers and table counts (admin only)", body = ApiResponse<DashboardSnapshot>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<ApiResponse<DashboardSnapshot>>> {
    let resp = dashboard_service::dashboard(&state, &user, query.at).await?;
    Ok(Json(resp))
}
