pub mod auth;
pub mod bookings;
pub mod health;
pub mod host;
pub mod reviews;
pub mod spaces;
