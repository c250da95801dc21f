//! Shared application state.
//!
//! One `AppState` per process, wrapped in `Arc` and handed to the axum
//! router. Holds the database location and the AI client; connections
//! are opened per request (SQLite is cheap to open and this keeps
//! handlers free of connection lifetime concerns).

use std::path::PathBuf;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::gemini::GeminiClient;

pub struct AppState {
    db_path: PathBuf,
    pub gemini: GeminiClient,
}

impl AppState {
    /// Create state and eagerly open the database once so migrations run
    /// (and failures surface) at startup rather than on first request.
    pub fn new(db_path: PathBuf, gemini: GeminiClient) -> Result<Self, DatabaseError> {
        let conn = db::open_database(&db_path)?;
        drop(conn);
        Ok(Self { db_path, gemini })
    }

    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}
