use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    analytics::{RevenueReport, TableStatusCounts},
    models::MenuItem,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DashboardQuery {
    /// Reference instant for the trailing windows; defaults to now.
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub revenue: RevenueReport,
    pub tables: TableStatusCounts,
    pub top_menu_items: Vec<MenuItem>,
}
