//! Stateless search/filter/sort over flight and booking collections.
//! Everything here recomputes from the slice it is handed; nothing is
//! cached between calls.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::models::{Booking, BookingStatus, Flight};

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightSortField {
    #[default]
    FlightNo,
    Origin,
    Destination,
    Departure,
    Seats,
    Price,
    Duration,
    Aircraft,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingSortField {
    #[default]
    Id,
    PassengerName,
    BookingDate,
    TotalAmount,
    Status,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Cancelled,
}

impl StatusFilter {
    pub fn keeps(self, status: BookingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == BookingStatus::Pending,
            StatusFilter::Confirmed => status == BookingStatus::Confirmed,
            StatusFilter::Cancelled => status == BookingStatus::Cancelled,
        }
    }
}

/// Case-insensitive match: the identifier field by prefix, every other
/// designated field by substring. A blank term matches everything.
fn matches(term_lc: &str, key: &str, fields: &[&str]) -> bool {
    term_lc.is_empty()
        || key.to_lowercase().starts_with(term_lc)
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(term_lc))
}

pub fn search_flights(mut flights: Vec<Flight>, term: &str) -> Vec<Flight> {
    let term_lc = term.trim().to_lowercase();
    flights.retain(|f| matches(&term_lc, &f.flight_no, &[&f.origin, &f.destination]));
    flights
}

pub fn search_bookings(mut bookings: Vec<Booking>, term: &str) -> Vec<Booking> {
    let term_lc = term.trim().to_lowercase();
    bookings.retain(|b| {
        matches(
            &term_lc,
            &b.id.to_string(),
            &[&b.flight.flight_no, &b.passenger_name, &b.email],
        )
    });
    bookings
}

pub fn filter_by_status(mut bookings: Vec<Booking>, filter: StatusFilter) -> Vec<Booking> {
    bookings.retain(|b| filter.keeps(b.status));
    bookings
}

fn str_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable sort; equal keys keep their incoming relative order.
pub fn sort_flights(flights: &mut [Flight], field: FlightSortField, direction: SortDirection) {
    flights.sort_by(|a, b| {
        let ord = match field {
            FlightSortField::FlightNo => str_cmp(&a.flight_no, &b.flight_no),
            FlightSortField::Origin => str_cmp(&a.origin, &b.origin),
            FlightSortField::Destination => str_cmp(&a.destination, &b.destination),
            FlightSortField::Departure => str_cmp(&a.departure, &b.departure),
            FlightSortField::Seats => a.seats.cmp(&b.seats),
            FlightSortField::Price => a.price.cmp(&b.price),
            FlightSortField::Duration => str_cmp(&a.duration, &b.duration),
            FlightSortField::Aircraft => str_cmp(&a.aircraft, &b.aircraft),
        };
        direction.apply(ord)
    });
}

pub fn sort_bookings(bookings: &mut [Booking], field: BookingSortField, direction: SortDirection) {
    bookings.sort_by(|a, b| {
        let ord = match field {
            // Numeric on purpose: id 10 sorts after id 9, not after id 1.
            BookingSortField::Id => a.id.cmp(&b.id),
            BookingSortField::PassengerName => str_cmp(&a.passenger_name, &b.passenger_name),
            BookingSortField::BookingDate => a.booking_date.cmp(&b.booking_date),
            BookingSortField::TotalAmount => a.total_amount.cmp(&b.total_amount),
            BookingSortField::Status => str_cmp(a.status.as_str(), b.status.as_str()),
        };
        direction.apply(ord)
    });
}
