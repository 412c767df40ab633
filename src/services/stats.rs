//! Dashboard summary figures. Always derived fresh from the snapshot it
//! is handed; nothing is maintained incrementally, so the numbers cannot
//! drift from the underlying collections.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{Booking, BookingStatus, Flight};

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_flights: usize,
    /// Combined seat capacity across flights, not seats booked.
    pub total_seats: i64,
    pub distinct_destinations: usize,
    pub total_bookings: usize,
    pub confirmed_count: usize,
    pub pending_count: usize,
    pub cancelled_count: usize,
    /// Sum of booking totals, confirmed bookings only.
    pub total_revenue: i64,
}

pub fn summarize(flights: &[Flight], bookings: &[Booking]) -> Summary {
    let destinations: HashSet<String> = flights
        .iter()
        .map(|f| f.destination.trim().to_lowercase())
        .collect();

    let count_status = |status: BookingStatus| -> usize {
        bookings.iter().filter(|b| b.status == status).count()
    };

    Summary {
        total_flights: flights.len(),
        total_seats: flights.iter().map(|f| f.seats).sum(),
        distinct_destinations: destinations.len(),
        total_bookings: bookings.len(),
        confirmed_count: count_status(BookingStatus::Confirmed),
        pending_count: count_status(BookingStatus::Pending),
        cancelled_count: count_status(BookingStatus::Cancelled),
        total_revenue: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .map(|b| b.total_amount)
            .sum(),
    }
}
