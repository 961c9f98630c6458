use std::sync::Arc;

use chrono::{Duration, Utc};
use restaurant_api::{
    dto::{
        bookings::CreateBookingRequest, cart::AddToCartRequest, menu::UpdateCategoryRequest,
        orders::CheckoutRequest, ratings::SubmitRatingRequest,
    },
    entity::{
        audit_logs, bookings, cart_items, categories, dining_tables,
        enums::{BookingStatus, TableStatus, UserRole},
        menu_items, order_items,
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::{booking_service, cart_service, menu_service, order_service, rating_service},
    state::AppState,
};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

// Service behaviour against a mocked Postgres connection. Inserts and updates
// use RETURNING on Postgres, so each one consumes a queued query result.

fn state_with(db: MockDatabase) -> AppState {
    AppState::new(db.into_connection(), "test-secret")
}

fn statement_log(state: AppState) -> Vec<String> {
    Arc::try_unwrap(state.orm)
        .ok()
        .expect("no other handle to the mock connection")
        .into_transaction_log()
        .iter()
        .map(|txn| format!("{txn:?}"))
        .collect()
}

fn auth(role: UserRole) -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role,
    }
}

fn audit_row() -> audit_logs::Model {
    audit_logs::Model {
        id: Uuid::new_v4(),
        user_id: None,
        action: "test".into(),
        resource: None,
        metadata: None,
        created_at: Utc::now().into(),
    }
}

fn menu_item(id: Uuid, in_stock: bool) -> menu_items::Model {
    menu_items::Model {
        id,
        name: "Fried Rice".into(),
        price: 3_500,
        category_id: Uuid::new_v4(),
        order_count: 0,
        in_stock,
        image_url: None,
        description: None,
        created_at: Utc::now().into(),
    }
}

fn cart_line(user_id: Uuid, item: &menu_items::Model, quantity: i32) -> cart_items::Model {
    cart_items::Model {
        id: Uuid::new_v4(),
        user_id,
        menu_item_id: item.id,
        name: item.name.clone(),
        price: item.price,
        category_id: item.category_id,
        image_url: None,
        description: None,
        quantity,
        created_at: Utc::now().into(),
    }
}

fn table(id: Uuid, status: TableStatus) -> dining_tables::Model {
    dining_tables::Model {
        id,
        name: "T3".into(),
        capacity: 4,
        status,
        image_url: None,
        created_at: Utc::now().into(),
    }
}

fn booking(user_id: Uuid, table_id: Uuid, status: BookingStatus) -> bookings::Model {
    let now = Utc::now();
    bookings::Model {
        id: Uuid::new_v4(),
        table_id: Some(table_id),
        user_id,
        table_name: "T3".into(),
        customer_name: "Dana".into(),
        phone: "555-0101".into(),
        guest_count: 2,
        booking_time: now.into(),
        note: None,
        status,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn adding_an_item_already_in_the_cart_merges_quantities() {
    let user = auth(UserRole::Customer);
    let item = menu_item(Uuid::new_v4(), true);
    let existing = cart_line(user.user_id, &item, 2);
    let mut merged = existing.clone();
    merged.quantity = 5;

    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![item.clone()]])
            .append_query_results(vec![vec![existing]])
            .append_query_results(vec![vec![merged]])
            .append_query_results(vec![vec![audit_row()]]),
    );

    let resp = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            menu_item_id: item.id,
            quantity: 3,
        },
    )
    .await
    .unwrap();
    let line = resp.data.unwrap();
    assert_eq!(line.quantity, 5);
    assert_eq!(line.menu_item_id, item.id);

    let log = statement_log(state);
    assert!(
        log.iter()
            .any(|stmt| stmt.contains("UPDATE") && stmt.contains("cart_items")),
        "expected the existing line to be updated"
    );
    assert!(
        !log.iter()
            .any(|stmt| stmt.contains("INSERT") && stmt.contains("cart_items") && !stmt.contains("audit_logs")),
        "no second cart line should be inserted"
    );
}

#[tokio::test]
async fn out_of_stock_items_cannot_be_added_to_the_cart() {
    let item = menu_item(Uuid::new_v4(), false);
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results(vec![vec![item.clone()]]),
    );

    let result = cart_service::add_to_cart(
        &state,
        &auth(UserRole::Customer),
        AddToCartRequest {
            menu_item_id: item.id,
            quantity: 1,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn cancelling_a_booking_frees_its_table() {
    let staff = auth(UserRole::Staff);
    let table_id = Uuid::new_v4();
    let confirmed = booking(Uuid::new_v4(), table_id, BookingStatus::Confirmed);
    let mut cancelled = confirmed.clone();
    cancelled.status = BookingStatus::Cancelled;

    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![confirmed.clone()]])
            .append_query_results(vec![vec![cancelled]])
            .append_query_results(vec![vec![table(table_id, TableStatus::Reserved)]])
            .append_query_results(vec![vec![table(table_id, TableStatus::Available)]])
            .append_query_results(vec![vec![audit_row()]]),
    );

    let resp = booking_service::cancel_booking(&state, &staff, confirmed.id)
        .await
        .unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.booking.status, BookingStatus::Cancelled);
    assert_eq!(data.table.unwrap().status, TableStatus::Available);
}

#[tokio::test]
async fn a_cancelled_booking_cannot_be_cancelled_again() {
    let staff = auth(UserRole::Staff);
    let cancelled = booking(Uuid::new_v4(), Uuid::new_v4(), BookingStatus::Cancelled);
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![cancelled.clone()]]),
    );

    let result = booking_service::cancel_booking(&state, &staff, cancelled.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn customers_cannot_cancel_someone_elses_booking() {
    let customer = auth(UserRole::Customer);
    let other = booking(Uuid::new_v4(), Uuid::new_v4(), BookingStatus::Confirmed);
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results(vec![vec![other.clone()]]),
    );

    let result = booking_service::cancel_booking(&state, &customer, other.id).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn ratings_outside_one_to_five_are_rejected() {
    let state = state_with(MockDatabase::new(DatabaseBackend::Postgres));
    let user = auth(UserRole::Customer);

    for rating in [0, 6, -1] {
        let result = rating_service::submit_rating(
            &state,
            &user,
            SubmitRatingRequest {
                customer_name: "Dana".into(),
                rating,
                feedback: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))), "rating {rating}");
    }
}

#[tokio::test]
async fn menu_items_referenced_by_orders_are_not_deleted() {
    let admin = auth(UserRole::Admin);
    let id = Uuid::new_v4();
    let line = order_items::Model {
        order_id: Uuid::new_v4(),
        menu_item_id: id,
        quantity: 1,
        price: 3_500,
        notes: None,
    };
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results(vec![vec![line]]),
    );

    let result = menu_service::delete_menu_item(&state, &admin, id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn unreferenced_menu_items_are_deleted() {
    let admin = auth(UserRole::Admin);
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<order_items::Model>::new()])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results(vec![vec![audit_row()]]),
    );

    let resp = menu_service::delete_menu_item(&state, &admin, Uuid::new_v4())
        .await
        .unwrap();
    assert_eq!(resp.message, "Deleted");
}

#[tokio::test]
async fn only_admins_delete_menu_items() {
    let state = state_with(MockDatabase::new(DatabaseBackend::Postgres));
    let result = menu_service::delete_menu_item(&state, &auth(UserRole::Staff), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn checkout_with_an_empty_cart_is_rejected() {
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<cart_items::Model>::new()]),
    );

    let result = order_service::checkout(
        &state,
        &auth(UserRole::Customer),
        CheckoutRequest {
            table_id: None,
            customer_name: "Dana".into(),
            customer_phone: None,
            customer_email: None,
            payment_method: "cash".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn a_new_cart_line_is_inserted_with_an_upsert() {
    let user = auth(UserRole::Customer);
    let item = menu_item(Uuid::new_v4(), true);

    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![item.clone()]])
            .append_query_results(vec![Vec::<cart_items::Model>::new()])
            .append_query_results(vec![vec![cart_line(user.user_id, &item, 2)]])
            .append_query_results(vec![vec![audit_row()]]),
    );

    let resp = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            menu_item_id: item.id,
            quantity: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap().quantity, 2);

    let log = statement_log(state);
    assert!(
        log.iter()
            .any(|stmt| stmt.contains("INSERT") && stmt.contains("ON CONFLICT")),
        "a racing add must merge instead of failing on the unique line"
    );
}

#[tokio::test]
async fn clearing_the_cart_zeroes_every_total() {
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres).append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }]),
    );

    let view = cart_service::clear_cart(&state, &auth(UserRole::Customer))
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(view.items.is_empty());
    assert_eq!(view.item_count, 0);
    assert_eq!(view.summary.subtotal, 0);
    assert_eq!(view.summary.tax, 0);
    assert_eq!(view.summary.total, 0);
}

fn booking_request(table_id: Uuid, guest_count: i32) -> CreateBookingRequest {
    CreateBookingRequest {
        table_id,
        customer_name: "Dana".into(),
        phone: "555-0101".into(),
        guest_count,
        booking_time: Utc::now() + Duration::hours(2),
        note: None,
    }
}

#[tokio::test]
async fn booking_a_table_marks_it_reserved() {
    let customer = auth(UserRole::Customer);
    let table_id = Uuid::new_v4();
    let created = booking(customer.user_id, table_id, BookingStatus::Confirmed);

    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![table(table_id, TableStatus::Available)]])
            .append_query_results(vec![vec![created]])
            .append_query_results(vec![vec![table(table_id, TableStatus::Reserved)]])
            .append_query_results(vec![vec![audit_row()]]),
    );

    let data = booking_service::create_booking(&state, &customer, booking_request(table_id, 2))
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(data.booking.status, BookingStatus::Confirmed);
    assert_eq!(data.booking.user_id, customer.user_id);
    assert_eq!(data.table.unwrap().status, TableStatus::Reserved);
}

#[tokio::test]
async fn bookings_larger_than_the_table_are_refused() {
    let table_id = Uuid::new_v4();
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![table(table_id, TableStatus::Available)]]),
    );

    let result = booking_service::create_booking(
        &state,
        &auth(UserRole::Customer),
        booking_request(table_id, 9),
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

fn category(name: &str) -> categories::Model {
    categories::Model {
        id: Uuid::new_v4(),
        name: name.into(),
        description: None,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn renaming_a_category_to_a_taken_name_conflicts() {
    let drinks = category("Drinks");
    let mains = category("Mains");
    let state = state_with(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![drinks.clone()]])
            .append_query_results(vec![vec![mains]]),
    );

    let result = menu_service::update_category(
        &state,
        &auth(UserRole::Admin),
        drinks.id,
        UpdateCategoryRequest {
            name: Some("Mains".into()),
            description: None,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}
