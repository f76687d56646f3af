//! Shared types for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use uuid::Uuid;

use crate::api::error::ApiError;

/// Shared context for all routes and middleware.
///
/// The store is a single SQLite connection behind a mutex, so every
/// request touches it sequentially. Handlers must drop the guard before
/// any `.await`.
#[derive(Clone)]
pub struct ApiContext {
    store: Arc<Mutex<Connection>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            store: Arc::new(Mutex::new(conn)),
        }
    }

    /// Lock the store for the duration of one request.
    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))
    }
}

/// Parse a patient id from the path. A malformed id cannot name a stored
/// patient, so it is reported as not found.
pub fn parse_patient_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::patient_not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn context_clones_share_store() {
        let ctx = ApiContext::new(open_memory_database().unwrap());
        let other = ctx.clone();
        {
            let conn = ctx.db().unwrap();
            conn.execute_batch("CREATE TABLE scratch (x INTEGER)").unwrap();
        }
        let conn = other.db().unwrap();
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'scratch'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn malformed_patient_id_is_not_found() {
        assert!(matches!(
            parse_patient_id("not-a-uuid"),
            Err(ApiError::NotFound(_))
        ));
        let id = Uuid::new_v4();
        assert_eq!(parse_patient_id(&id.to_string()).unwrap(), id);
    }
}
