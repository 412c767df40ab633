use serde::{Deserialize, Serialize};

/// A single-leg scheduled service. `departure`, `duration` and `aircraft`
/// are opaque display labels; the core never parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: i64,
    pub flight_no: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub seats: i64,
    /// Price per seat in the smallest currency denomination.
    pub price: i64,
    pub duration: String,
    pub aircraft: String,
}

/// Creation payload: everything but the system-assigned id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlight {
    pub flight_no: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub seats: i64,
    pub price: i64,
    pub duration: String,
    pub aircraft: String,
}

/// Partial update. The frontend PUTs the whole form object, so `flight_no`
/// may appear here, but it must match the record being edited.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPatch {
    pub flight_no: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure: Option<String>,
    pub seats: Option<i64>,
    pub price: Option<i64>,
    pub duration: Option<String>,
    pub aircraft: Option<String>,
}
