use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::TreatmentRecord;

pub fn insert_treatment(conn: &Connection, t: &TreatmentRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO treatments (id, patient_id, treatment, treatment_date, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            t.id.to_string(),
            t.patient_id.to_string(),
            t.treatment,
            t.treatment_date,
            t.notes,
            format_timestamp(&t.created_at),
        ],
    )?;
    Ok(())
}

/// Treatments for a patient, most recent treatment date first.
pub fn get_treatments_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<TreatmentRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, treatment, treatment_date, notes, created_at
         FROM treatments
         WHERE patient_id = ?1
         ORDER BY treatment_date DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok(TreatmentRecord {
            id: uuid_column(row, 0)?,
            patient_id: uuid_column(row, 1)?,
            treatment: row.get(2)?,
            treatment_date: row.get(3)?,
            notes: row.get(4)?,
            created_at: timestamp_column(row, 5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
