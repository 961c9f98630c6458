use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{analytics::TableStatusCounts, entity::enums::TableStatus, models::DiningTable};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    pub name: String,
    pub capacity: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTableStatusRequest {
    pub status: TableStatus,
}

/// Floor overview: the (optionally filtered) tables plus counts over all tables.
#[derive(Debug, Serialize, ToSchema)]
pub struct TableBoard {
    pub tables: Vec<DiningTable>,
    pub counts: TableStatusCounts,
}
