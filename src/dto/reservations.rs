use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Reservation;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub table_id: Option<Uuid>,
    pub customer_name: String,
    pub phone: String,
    pub guest_count: i32,
    pub reserved_at: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReservationList {
    #[schema(value_type = Vec<Reservation>)]
    pub items: Vec<Reservation>,
}
