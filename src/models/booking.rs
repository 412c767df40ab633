use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Flight;

/// A passenger reservation against one flight. `total_amount` is a price
/// snapshot taken at creation and never recomputed from the flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub passenger_name: String,
    pub email: String,
    pub phone: String,
    pub seats_booked: i64,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub booking_date: NaiveDate,
    pub special_requests: Option<String>,
    pub flight: Flight,
}

/// Creation payload. The flight is referenced by its flight number; the
/// ledger resolves it to a concrete record before anything is written.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub flight_no: String,
    pub passenger_name: String,
    pub email: String,
    pub phone: String,
    pub seats: i64,
    #[serde(default)]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Stored values always come from `as_str`; anything else in the column
    /// is read back as pending.
    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}
