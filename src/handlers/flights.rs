use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Flight, FlightPatch, NewFlight};
use crate::services::catalog;
use crate::services::query::{self, FlightSortField, SortDirection};

#[derive(Debug, Default, Deserialize)]
pub struct FlightListQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub sort: FlightSortField,
    #[serde(default)]
    pub dir: SortDirection,
}

// GET /api/flights
pub async fn list_flights(
    State(state): State<Arc<crate::state::AppState>>,
    Query(params): Query<FlightListQuery>,
) -> Result<Json<Vec<Flight>>, AppError> {
    let flights = {
        let db = state.db.lock().unwrap();
        queries::list_flights(&db)?
    };

    let mut flights = query::search_flights(flights, params.q.as_deref().unwrap_or(""));
    query::sort_flights(&mut flights, params.sort, params.dir);
    Ok(Json(flights))
}

// POST /api/flights
pub async fn create_flight(
    State(state): State<Arc<crate::state::AppState>>,
    Json(new): Json<NewFlight>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let db = state.db.lock().unwrap();
    let flight = catalog::create_flight(&db, &new)?;
    Ok((StatusCode::CREATED, Json(flight)))
}

// PUT /api/flights/:flight_no
pub async fn update_flight(
    State(state): State<Arc<crate::state::AppState>>,
    Path(flight_no): Path<String>,
    Json(patch): Json<FlightPatch>,
) -> Result<Json<Flight>, AppError> {
    let db = state.db.lock().unwrap();
    let flight = catalog::update_flight(&db, &flight_no, &patch)?;
    Ok(Json(flight))
}

// DELETE /api/flights/:flight_no
pub async fn delete_flight(
    State(state): State<Arc<crate::state::AppState>>,
    Path(flight_no): Path<String>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    catalog::delete_flight(&db, &flight_no)?;
    Ok(StatusCode::NO_CONTENT)
}
