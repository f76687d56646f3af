use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{format_timestamp, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::Patient;

const PATIENT_COLUMNS: &str = "id, first_name, last_name, address, date_of_birth, department,
     doctor, sex, phone_number, emergency_contact, admission_date, bed_number, photo, created_at";

pub fn insert_patient(conn: &Connection, p: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, first_name, last_name, address, date_of_birth, department,
         doctor, sex, phone_number, emergency_contact, admission_date, bed_number, photo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            p.id.to_string(),
            p.first_name,
            p.last_name,
            p.address,
            p.date_of_birth,
            p.department,
            p.doctor,
            p.sex,
            p.phone_number,
            p.emergency_contact,
            p.admission_date,
            p.bed_number,
            p.photo,
            format_timestamp(&p.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1");
    let patient = conn
        .query_row(&sql, params![id.to_string()], row_to_patient)
        .optional()?;
    Ok(patient)
}

/// Like `get_patient`, but a missing patient is an error.
pub fn require_patient(conn: &Connection, id: &Uuid) -> Result<Patient, DatabaseError> {
    get_patient(conn, id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "patient".into(),
        id: id.to_string(),
    })
}

/// All patients in admission order.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY created_at ASC, rowid ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_patient)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

fn row_to_patient(row: &rusqlite::Row) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: uuid_column(row, 0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        address: row.get(3)?,
        date_of_birth: row.get(4)?,
        department: row.get(5)?,
        doctor: row.get(6)?,
        sex: row.get(7)?,
        phone_number: row.get(8)?,
        emergency_contact: row.get(9)?,
        admission_date: row.get(10)?,
        bed_number: row.get(11)?,
        photo: row.get(12)?,
        created_at: timestamp_column(row, 13)?,
    })
}
