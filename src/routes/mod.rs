use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod bookings;
pub mod cart;
pub mod doc;
pub mod health;
pub mod menu;
pub mod orders;
pub mod params;
pub mod ratings;
pub mod reservations;
pub mod tables;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/menu", menu::router())
        .nest("/categories", menu::categories_router())
        .nest("/tables", tables::router())
        .nest("/bookings", bookings::router())
        .nest("/reservations", reservations::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/ratings", ratings::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
}
