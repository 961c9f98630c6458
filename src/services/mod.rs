pub mod booking_service;
pub mod cart_service;
pub mod dashboard_service;
pub mod menu_service;
pub mod order_service;
pub mod rating_service;
pub mod reservation_service;
pub mod table_service;
pub mod user_service;

use crate::error::{AppError, AppResult};

/// Trimmed value of a mandatory text field.
pub(crate) fn require_text(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed optional text, blank collapsing to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn require_positive(value: i32, field: &str) -> AppResult<i32> {
    if value < 1 {
        return Err(AppError::BadRequest(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(value)
}
