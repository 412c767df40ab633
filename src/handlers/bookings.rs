use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, NewBooking};
use crate::services::ledger;
use crate::services::query::{self, BookingSortField, SortDirection, StatusFilter};

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: BookingSortField,
    #[serde(default)]
    pub dir: SortDirection,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<crate::state::AppState>>,
    Query(params): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::list_bookings(&db)?
    };

    let bookings = query::search_bookings(bookings, params.q.as_deref().unwrap_or(""));
    let mut bookings = query::filter_by_status(bookings, params.status);
    query::sort_bookings(&mut bookings, params.sort, params.dir);
    Ok(Json(bookings))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<crate::state::AppState>>,
    Json(new): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let db = state.db.lock().unwrap();
    let booking = ledger::create_booking(&db, &new)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// PUT /api/bookings/:id — the soft path; the record stays in the ledger.
pub async fn update_booking_status(
    State(state): State<Arc<crate::state::AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Booking>, AppError> {
    let db = state.db.lock().unwrap();
    let booking = ledger::set_booking_status(&db, id, update.status)?;
    Ok(Json(booking))
}

// DELETE /api/bookings/:id — the hard path; the record is gone for good.
pub async fn delete_booking(
    State(state): State<Arc<crate::state::AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    ledger::remove_booking(&db, id)?;
    Ok(StatusCode::NO_CONTENT)
}
