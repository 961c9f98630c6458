use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Rating;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRatingRequest {
    pub customer_name: String,
    pub rating: i32,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RatingList {
    #[schema(value_type = Vec<Rating>)]
    pub items: Vec<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    pub count: i64,
    pub average: f64,
    /// Number of ratings per star, index 0 holds one-star ratings.
    pub distribution: [i64; 5],
}
