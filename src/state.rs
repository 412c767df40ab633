use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;

/// Shared handler state. The single connection behind a mutex serializes
/// all reads and mutations, which is what gives each session
/// read-your-writes ordering.
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
}
