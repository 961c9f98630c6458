pub mod bookings;
pub mod cart;
pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod ratings;
pub mod reservations;
pub mod tables;
pub mod users;
