use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Flight, FlightPatch, NewFlight};

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_positive(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}

pub fn create_flight(conn: &Connection, new: &NewFlight) -> Result<Flight, AppError> {
    require_text(&new.flight_no, "flightNo")?;
    require_text(&new.origin, "origin")?;
    require_text(&new.destination, "destination")?;
    require_text(&new.departure, "departure")?;
    require_text(&new.duration, "duration")?;
    require_text(&new.aircraft, "aircraft")?;
    require_positive(new.seats, "seats")?;
    require_positive(new.price, "price")?;

    if queries::flight_by_no(conn, &new.flight_no)?.is_some() {
        return Err(AppError::Conflict(format!(
            "flight {} already exists",
            new.flight_no
        )));
    }

    let flight = queries::insert_flight(conn, new)?;
    tracing::info!(flight_no = %flight.flight_no, "flight created");
    Ok(flight)
}

pub fn update_flight(
    conn: &Connection,
    flight_no: &str,
    patch: &FlightPatch,
) -> Result<Flight, AppError> {
    let mut flight = queries::flight_by_no(conn, flight_no)?
        .ok_or_else(|| AppError::NotFound(format!("flight {flight_no}")))?;

    // The identifier is immutable; a patch may echo it back but not change it.
    if let Some(patched_no) = &patch.flight_no {
        if patched_no != &flight.flight_no {
            return Err(AppError::Validation(
                "flightNo is immutable once a flight exists".to_string(),
            ));
        }
    }

    if let Some(origin) = &patch.origin {
        require_text(origin, "origin")?;
        flight.origin = origin.clone();
    }
    if let Some(destination) = &patch.destination {
        require_text(destination, "destination")?;
        flight.destination = destination.clone();
    }
    if let Some(departure) = &patch.departure {
        require_text(departure, "departure")?;
        flight.departure = departure.clone();
    }
    if let Some(duration) = &patch.duration {
        require_text(duration, "duration")?;
        flight.duration = duration.clone();
    }
    if let Some(aircraft) = &patch.aircraft {
        require_text(aircraft, "aircraft")?;
        flight.aircraft = aircraft.clone();
    }
    if let Some(seats) = patch.seats {
        require_positive(seats, "seats")?;
        flight.seats = seats;
    }
    if let Some(price) = patch.price {
        require_positive(price, "price")?;
        flight.price = price;
    }

    queries::update_flight(conn, &flight)?;
    tracing::info!(flight_no = %flight.flight_no, "flight updated");
    Ok(flight)
}

/// Deletes a flight. Blocked while any pending or confirmed booking still
/// references it; soft-cancelled leftovers are swept away by the cascade.
pub fn delete_flight(conn: &Connection, flight_no: &str) -> Result<(), AppError> {
    let flight = queries::flight_by_no(conn, flight_no)?
        .ok_or_else(|| AppError::NotFound(format!("flight {flight_no}")))?;

    let active = queries::active_booking_count(conn, flight.id)?;
    if active > 0 {
        return Err(AppError::Conflict(format!(
            "flight {flight_no} has {active} active booking(s)"
        )));
    }

    queries::delete_flight(conn, flight.id)?;
    tracing::info!(flight_no = %flight_no, "flight deleted");
    Ok(())
}
