//! Repository layer: collection-scoped database operations.
//!
//! One sub-module per collection. All public functions are re-exported here.

mod clinical_reading;
mod patient;
mod treatment;
mod user;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use uuid::Uuid;

use crate::models::TIMESTAMP_FORMAT;

pub use clinical_reading::*;
pub use patient::*;
pub use treatment::*;
pub use user::*;

pub(crate) fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn uuid_column(row: &rusqlite::Row, idx: usize) -> Result<Uuid, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn timestamp_column(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<NaiveDateTime, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
