use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::services::stats::{self, Summary};

// GET /api/stats — recomputed from the live collections on every call.
pub async fn get_stats(
    State(state): State<Arc<crate::state::AppState>>,
) -> Result<Json<Summary>, AppError> {
    let (flights, bookings) = {
        let db = state.db.lock().unwrap();
        (queries::list_flights(&db)?, queries::list_bookings(&db)?)
    };

    Ok(Json(stats::summarize(&flights, &bookings)))
}
