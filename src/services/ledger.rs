use chrono::Utc;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, NewBooking};

/// The only legal moves. Pending bookings resolve either way, cancelled
/// ones can be restored, and confirmed bookings never change status — a
/// confirmed booking leaves the ledger through `remove_booking` instead.
fn transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed) | (Pending, Cancelled) | (Cancelled, Confirmed)
    )
}

pub fn create_booking(conn: &Connection, new: &NewBooking) -> Result<Booking, AppError> {
    if new.passenger_name.trim().is_empty() {
        return Err(AppError::Validation(
            "passengerName must not be empty".to_string(),
        ));
    }
    if new.email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }
    if new.phone.trim().is_empty() {
        return Err(AppError::Validation("phone must not be empty".to_string()));
    }
    if new.seats < 1 {
        return Err(AppError::Validation(
            "seats must be at least 1".to_string(),
        ));
    }

    // An unresolvable flight number is a bad request, not a missing
    // resource: the booking form submits before any flight is looked up.
    let flight = queries::flight_by_no(conn, &new.flight_no)?.ok_or_else(|| {
        AppError::Validation(format!("unknown flight number {}", new.flight_no))
    })?;

    if new.seats > flight.seats {
        return Err(AppError::Validation(format!(
            "requested {} seats but {} only has {}",
            new.seats, flight.flight_no, flight.seats
        )));
    }

    // Price snapshot: later flight price edits do not touch this. Checked
    // so an extreme price that clears catalog validation cannot wrap the
    // total and poison the revenue sum.
    let total_amount = flight.price.checked_mul(new.seats).ok_or_else(|| {
        AppError::Validation(format!(
            "total amount overflows for {} seats at price {}",
            new.seats, flight.price
        ))
    })?;

    let mut booking = Booking {
        id: 0,
        passenger_name: new.passenger_name.clone(),
        email: new.email.clone(),
        phone: new.phone.clone(),
        seats_booked: new.seats,
        total_amount,
        status: BookingStatus::Confirmed,
        booking_date: Utc::now().date_naive(),
        special_requests: new.special_requests.clone(),
        flight,
    };
    booking.id = queries::insert_booking(conn, &booking)?;

    tracing::info!(
        booking_id = booking.id,
        flight_no = %booking.flight.flight_no,
        seats = booking.seats_booked,
        "booking created"
    );
    Ok(booking)
}

/// The soft path: status changes only, record retained. Repeating the
/// current status is a no-op so retries stay safe.
pub fn set_booking_status(
    conn: &Connection,
    id: i64,
    new_status: BookingStatus,
) -> Result<Booking, AppError> {
    let booking = queries::booking_by_id(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;

    if booking.status == new_status {
        return Ok(booking);
    }
    if !transition_allowed(booking.status, new_status) {
        return Err(AppError::InvalidTransition {
            from: booking.status.as_str(),
            to: new_status.as_str(),
        });
    }

    queries::update_booking_status(conn, id, new_status)?;
    tracing::info!(booking_id = id, status = new_status.as_str(), "booking status updated");

    Ok(Booking {
        status: new_status,
        ..booking
    })
}

/// The hard path: the record is gone for good. Used to cancel bookings
/// that are already confirmed.
pub fn remove_booking(conn: &Connection, id: i64) -> Result<(), AppError> {
    if queries::booking_by_id(conn, id)?.is_none() {
        return Err(AppError::NotFound(format!("booking {id}")));
    }
    queries::delete_booking(conn, id)?;
    tracing::info!(booking_id = id, "booking removed");
    Ok(())
}
