pub mod bookings;
pub mod flights;
pub mod health;
pub mod stats;
