use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::ratings::{RatingList, RatingSummary, SubmitRatingRequest},
    entity::ratings::{ActiveModel as RatingActive, Column as RatingCol, Entity as Ratings, Model as RatingModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Rating,
    response::{ApiResponse, Meta},
    routes::params::RatingQuery,
    services::{optional_text, require_text},
    state::AppState,
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_rating(rating: i32) -> AppResult<i32> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::BadRequest(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(rating)
}

pub async fn submit_rating(
    state: &AppState,
    user: &AuthUser,
    payload: SubmitRatingRequest,
) -> AppResult<ApiResponse<Rating>> {
    let rating = validate_rating(payload.rating)?;
    let customer_name = require_text(&payload.customer_name, "customer_name")?;

    let saved = RatingActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(customer_name),
        rating: Set(rating),
        feedback: Set(optional_text(payload.feedback)),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    audit::record(
        state.db(),
        Some(user.user_id),
        "rating_submit",
        "ratings",
        serde_json::json!({ "rating_id": saved.id, "rating": saved.rating }),
    )
    .await;

    Ok(ApiResponse::success(
        "Thank you for your feedback",
        rating_from_entity(saved),
        Some(Meta::empty()),
    ))
}

pub async fn list_ratings(
    state: &AppState,
    query: RatingQuery,
) -> AppResult<ApiResponse<RatingList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(min) = query.min_rating {
        condition = condition.add(RatingCol::Rating.gte(min));
    }

    let finder = Ratings::find()
        .filter(condition)
        .order_by_desc(RatingCol::CreatedAt);
    let total = finder.clone().count(state.db()).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(rating_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Ratings", RatingList { items }, Some(meta)))
}

pub async fn rating_summary(state: &AppState) -> AppResult<ApiResponse<RatingSummary>> {
    let values: Vec<i32> = Ratings::find()
        .select_only()
        .column(RatingCol::Rating)
        .into_tuple()
        .all(state.db())
        .await?;

    Ok(ApiResponse::success(
        "Rating summary",
        summarize_ratings(&values),
        Some(Meta::unpaged(values.len())),
    ))
}

/// Count, two-decimal average and per-star histogram. Values outside 1..=5
/// are ignored.
pub fn summarize_ratings(values: &[i32]) -> RatingSummary {
    let mut distribution = [0i64; 5];
    let mut sum: i64 = 0;
    let mut count: i64 = 0;
    for &value in values {
        if validate_rating(value).is_err() {
            continue;
        }
        distribution[(value - MIN_RATING) as usize] += 1;
        sum += i64::from(value);
        count += 1;
    }

    let average = if count == 0 {
        0.0
    } else {
        ((sum as f64 / count as f64) * 100.0).round() / 100.0
    };

    RatingSummary {
        count,
        average,
        distribution,
    }
}

fn rating_from_entity(model: RatingModel) -> Rating {
    Rating {
        id: model.id,
        customer_name: model.customer_name,
        rating: model.rating,
        feedback: model.feedback,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert_eq!(validate_rating(1).unwrap(), 1);
        assert_eq!(validate_rating(5).unwrap(), 5);
    }

    #[test]
    fn summary_of_no_ratings_is_zero() {
        let summary = summarize_ratings(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.distribution, [0; 5]);
    }

    #[test]
    fn summary_averages_and_buckets() {
        let summary = summarize_ratings(&[5, 4, 4, 1, 9]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.average, 3.5);
        assert_eq!(summary.distribution, [1, 0, 0, 2, 1]);
    }
}
