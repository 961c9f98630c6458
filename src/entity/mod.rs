pub mod audit_logs;
pub mod bookings;
pub mod cart_items;
pub mod categories;
pub mod dining_tables;
pub mod enums;
pub mod menu_items;
pub mod order_items;
pub mod orders;
pub mod ratings;
pub mod reservations;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use bookings::Entity as Bookings;
pub use cart_items::Entity as CartItems;
pub use categories::Entity as Categories;
pub use dining_tables::Entity as DiningTables;
pub use menu_items::Entity as MenuItems;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use ratings::Entity as Ratings;
pub use reservations::Entity as Reservations;
pub use users::Entity as Users;
