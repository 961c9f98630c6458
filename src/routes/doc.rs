use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    analytics::{
        DailyRevenue, LoyalCustomer, OrderStatusCounts, PeriodRevenue, RevenueReport,
        TableStatusCounts,
    },
    dto::{
        bookings::{BookingList, BookingWithTable, CreateBookingRequest},
        cart::{AddToCartRequest, CartView, UpdateCartQuantityRequest},
        dashboard::DashboardSnapshot,
        menu::{
            CategoryList, CreateCategoryRequest, CreateMenuItemRequest, MenuItemList,
            SetStockRequest, UpdateCategoryRequest, UpdateMenuItemRequest,
        },
        orders::{
            CheckoutRequest, CreateOrderRequest, OrderLineRequest, OrderList, OrderWithItems,
            UpdateOrderStatusRequest,
        },
        ratings::{RatingList, RatingSummary, SubmitRatingRequest},
        reservations::{CreateReservationRequest, ReservationList},
        tables::{CreateTableRequest, TableBoard, UpdateTableRequest, UpdateTableStatusRequest},
        users::{UpdateUserRequest, UpsertProfileRequest, UserList},
    },
    entity::enums::{BookingStatus, OrderStatus, TableStatus, UserRole, UserStatus},
    models::{
        Booking, CartItem, Category, DiningTable, MenuItem, Order, OrderItem, Rating,
        Reservation, User,
    },
    pricing::PriceSummary,
    response::{ApiResponse, Meta},
    routes::{
        admin, bookings, cart, health, menu, orders, ratings, reservations, tables, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::list_menu_items,
        menu::popular_items,
        menu::get_menu_item,
        menu::create_menu_item,
        menu::update_menu_item,
        menu::set_stock,
        menu::delete_menu_item,
        menu::list_categories,
        menu::create_category,
        menu::update_category,
        menu::delete_category,
        tables::table_board,
        tables::get_table,
        tables::create_table,
        tables::update_table,
        tables::update_table_status,
        tables::delete_table,
        bookings::list_bookings,
        bookings::create_booking,
        bookings::get_booking,
        bookings::cancel_booking,
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::delete_reservation,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::list_orders,
        orders::create_order,
        orders::checkout,
        orders::get_order,
        orders::update_order_status,
        orders::delete_order,
        ratings::list_ratings,
        ratings::submit_rating,
        ratings::rating_summary,
        users::get_profile,
        users::upsert_profile,
        users::list_users,
        users::update_user,
        users::delete_user,
        admin::dashboard
    ),
    components(
        schemas(
            User,
            Category,
            MenuItem,
            DiningTable,
            Reservation,
            Booking,
            Order,
            OrderItem,
            CartItem,
            Rating,
            TableStatus,
            OrderStatus,
            BookingStatus,
            UserRole,
            UserStatus,
            PriceSummary,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            SetStockRequest,
            MenuItemList,
            CreateTableRequest,
            UpdateTableRequest,
            UpdateTableStatusRequest,
            TableBoard,
            CreateBookingRequest,
            BookingWithTable,
            BookingList,
            CreateReservationRequest,
            ReservationList,
            AddToCartRequest,
            UpdateCartQuantityRequest,
            CartView,
            OrderLineRequest,
            CreateOrderRequest,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderWithItems,
            OrderList,
            SubmitRatingRequest,
            RatingList,
            RatingSummary,
            UpsertProfileRequest,
            UpdateUserRequest,
            UserList,
            DailyRevenue,
            LoyalCustomer,
            OrderStatusCounts,
            TableStatusCounts,
            PeriodRevenue,
            RevenueReport,
            DashboardSnapshot,
            Meta,
            ApiResponse<MenuItem>,
            ApiResponse<MenuItemList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<CartView>,
            ApiResponse<DashboardSnapshot>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Menu items and categories"),
        (name = "Tables", description = "Dining tables and their status"),
        (name = "Bookings", description = "Customer table bookings"),
        (name = "Reservations", description = "Staff recorded reservations"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Ratings", description = "Customer feedback"),
        (name = "Users", description = "Profiles and user administration"),
        (name = "Admin", description = "Admin dashboard"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
