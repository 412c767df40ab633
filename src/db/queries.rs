use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};

use crate::models::{Booking, BookingStatus, Flight, NewFlight};

const BOOKING_COLUMNS: &str = "b.id, b.passenger_name, b.email, b.phone, b.seats_booked,
     b.total_amount, b.status, b.booking_date, b.special_requests,
     f.id, f.flight_no, f.origin, f.destination, f.departure, f.seats, f.price,
     f.duration, f.aircraft";

fn flight_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Flight> {
    Ok(Flight {
        id: row.get(offset)?,
        flight_no: row.get(offset + 1)?,
        origin: row.get(offset + 2)?,
        destination: row.get(offset + 3)?,
        departure: row.get(offset + 4)?,
        seats: row.get(offset + 5)?,
        price: row.get(offset + 6)?,
        duration: row.get(offset + 7)?,
        aircraft: row.get(offset + 8)?,
    })
}

fn booking_from_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let status: String = row.get(6)?;
    let booking_date: String = row.get(7)?;

    Ok(Booking {
        id: row.get(0)?,
        passenger_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        seats_booked: row.get(4)?,
        total_amount: row.get(5)?,
        status: BookingStatus::from_str(&status),
        booking_date: NaiveDate::parse_from_str(&booking_date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
        special_requests: row.get(8)?,
        flight: flight_from_row(row, 9)?,
    })
}

// ── Flights ──

pub fn list_flights(conn: &Connection) -> rusqlite::Result<Vec<Flight>> {
    let mut stmt = conn.prepare(
        "SELECT id, flight_no, origin, destination, departure, seats, price, duration, aircraft
         FROM flights ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| flight_from_row(row, 0))?;
    rows.collect()
}

pub fn flight_by_no(conn: &Connection, flight_no: &str) -> rusqlite::Result<Option<Flight>> {
    let mut stmt = conn.prepare(
        "SELECT id, flight_no, origin, destination, departure, seats, price, duration, aircraft
         FROM flights WHERE flight_no = ?1",
    )?;
    let result = stmt.query_row(params![flight_no], |row| flight_from_row(row, 0));
    match result {
        Ok(flight) => Ok(Some(flight)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn insert_flight(conn: &Connection, new: &NewFlight) -> rusqlite::Result<Flight> {
    conn.execute(
        "INSERT INTO flights (flight_no, origin, destination, departure, seats, price, duration, aircraft)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            new.flight_no,
            new.origin,
            new.destination,
            new.departure,
            new.seats,
            new.price,
            new.duration,
            new.aircraft,
        ],
    )?;

    Ok(Flight {
        id: conn.last_insert_rowid(),
        flight_no: new.flight_no.clone(),
        origin: new.origin.clone(),
        destination: new.destination.clone(),
        departure: new.departure.clone(),
        seats: new.seats,
        price: new.price,
        duration: new.duration.clone(),
        aircraft: new.aircraft.clone(),
    })
}

/// Full-row update by id. The flight number is part of the row but the
/// catalog never lets it drift from the stored value.
pub fn update_flight(conn: &Connection, flight: &Flight) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE flights SET origin = ?1, destination = ?2, departure = ?3, seats = ?4,
             price = ?5, duration = ?6, aircraft = ?7
         WHERE id = ?8",
        params![
            flight.origin,
            flight.destination,
            flight.departure,
            flight.seats,
            flight.price,
            flight.duration,
            flight.aircraft,
            flight.id,
        ],
    )?;
    Ok(())
}

pub fn delete_flight(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM flights WHERE id = ?1", params![id])?;
    Ok(())
}

/// Bookings that still hold seats on the flight (anything not cancelled).
pub fn active_booking_count(conn: &Connection, flight_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE flight_id = ?1 AND status != 'cancelled'",
        params![flight_id],
        |row| row.get(0),
    )
}

// ── Bookings ──

pub fn list_bookings(conn: &Connection) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS}
         FROM bookings b JOIN flights f ON f.id = b.flight_id
         ORDER BY b.id ASC"
    ))?;
    let rows = stmt.query_map([], |row| booking_from_row(row))?;
    rows.collect()
}

pub fn booking_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS}
         FROM bookings b JOIN flights f ON f.id = b.flight_id
         WHERE b.id = ?1"
    ))?;
    let result = stmt.query_row(params![id], |row| booking_from_row(row));
    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Inserts the booking and returns the assigned row id.
pub fn insert_booking(conn: &Connection, booking: &Booking) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (flight_id, passenger_name, email, phone, seats_booked,
             total_amount, status, booking_date, special_requests)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            booking.flight.id,
            booking.passenger_name,
            booking.email,
            booking.phone,
            booking.seats_booked,
            booking.total_amount,
            booking.status.as_str(),
            booking.booking_date.format("%Y-%m-%d").to_string(),
            booking.special_requests,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_booking_status(
    conn: &Connection,
    id: i64,
    status: BookingStatus,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(())
}

pub fn delete_booking(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(())
}
