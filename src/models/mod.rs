pub mod booking;
pub mod flight;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use flight::{Flight, FlightPatch, NewFlight};
