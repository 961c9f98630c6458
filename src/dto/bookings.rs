use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Booking, DiningTable};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub table_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub guest_count: i32,
    pub booking_time: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingWithTable {
    pub booking: Booking,
    pub table: Option<DiningTable>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BookingList {
    #[schema(value_type = Vec<Booking>)]
    pub items: Vec<Booking>,
}
