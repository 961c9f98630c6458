use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::ratings::{RatingList, RatingSummary, SubmitRatingRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Rating,
    response::ApiResponse,
    routes::params::RatingQuery,
    services::rating_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(submit_rating))
        .route("/summary", get(rating_summary))
}

#[utoipa::path(
    get,
    path = "/api/ratings",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("min_rating" = Option<i32>, Query, description = "Only ratings at or above this value")
    ),
    responses(
        (status = 200, description = "Newest ratings first", body = ApiResponse<RatingList>)
    ),
    tag = "Ratings"
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    Query(query): Query<RatingQuery>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::list_ratings(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/ratings",
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Submit a 1 to 5 rating", body = ApiResponse<Rating>),
        (status = 400, description = "Rating out of range")
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SubmitRatingRequest>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    let resp = rating_service::submit_rating(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ratings/summary",
    responses(
        (status = 200, description = "Average and per-star distribution", body = ApiResponse<RatingSummary>)
    ),
    tag = "Ratings"
)]
pub async fn rating_summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RatingSummary>>> {
    let resp = rating_service::rating_summary(&state).await?;
    Ok(Json(resp))
}
