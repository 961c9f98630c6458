use restaurant_api::routes::{doc::ApiDoc, health::health_check};
use utoipa::OpenApi;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert!(!data.version.is_empty());
}

#[test]
fn openapi_lists_restaurant_endpoints() {
    let doc = ApiDoc::openapi();
    for path in [
        "/health",
        "/api/menu",
        "/api/tables/{id}/status",
        "/api/bookings/{id}/cancel",
        "/api/cart",
        "/api/orders/checkout",
        "/api/ratings/summary",
        "/api/admin/dashboard",
    ] {
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
