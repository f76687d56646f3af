use std::collections::BTreeMap;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, timestamp_column, uuid_column};
use crate::db::DatabaseError;
use crate::models::{Category, ClinicalReading, LatestReadings, ReadingValue};

const READING_COLUMNS: &str = "r.id, r.patient_id, r.date_time, r.category, r.value_primary,
     r.value_secondary, r.nurse_name, r.reading_type, r.created_at";

/// Insert a clinical reading.
pub fn insert_reading(conn: &Connection, r: &ClinicalReading) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO clinical_readings (id, patient_id, date_time, category, value_primary,
         value_secondary, nurse_name, reading_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            r.id.to_string(),
            r.patient_id.to_string(),
            format_timestamp(&r.date_time),
            r.category.as_str(),
            r.reading.primary(),
            r.reading.secondary(),
            r.nurse_name,
            r.reading_type,
            format_timestamp(&r.created_at),
        ],
    )?;
    Ok(())
}

/// All readings for a patient, newest first.
pub fn get_readings_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<ClinicalReading>, DatabaseError> {
    let sql = format!(
        "SELECT {READING_COLUMNS}
         FROM clinical_readings r
         WHERE r.patient_id = ?1
         ORDER BY r.date_time DESC, r.rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_reading)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Latest reading per category for one patient.
///
/// The inner query finds `MAX(date_time)` per category; the join pulls the
/// matching rows back. Ties on the timestamp resolve to the last insert.
pub fn get_latest_readings(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<LatestReadings, DatabaseError> {
    let sql = format!(
        "SELECT {READING_COLUMNS}
         FROM clinical_readings r
         JOIN (
             SELECT patient_id, category, MAX(date_time) AS latest
             FROM clinical_readings
             WHERE patient_id = ?1
             GROUP BY patient_id, category
         ) m ON r.patient_id = m.patient_id
            AND r.category = m.category
            AND r.date_time = m.latest
         ORDER BY r.rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_reading)?;
    let readings = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(LatestReadings::select(readings))
}

/// Latest reading per category for every patient that has readings.
pub fn get_latest_readings_all(
    conn: &Connection,
) -> Result<BTreeMap<Uuid, LatestReadings>, DatabaseError> {
    let sql = format!(
        "SELECT {READING_COLUMNS}
         FROM clinical_readings r
         JOIN (
             SELECT patient_id, category, MAX(date_time) AS latest
             FROM clinical_readings
             GROUP BY patient_id, category
         ) m ON r.patient_id = m.patient_id
            AND r.category = m.category
            AND r.date_time = m.latest
         ORDER BY r.rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_reading)?;

    let mut by_patient: BTreeMap<Uuid, LatestReadings> = BTreeMap::new();
    for row in rows {
        let reading = row?;
        by_patient.entry(reading.patient_id).or_default().offer(reading);
    }
    Ok(by_patient)
}

fn row_to_reading(row: &rusqlite::Row) -> Result<ClinicalReading, rusqlite::Error> {
    let category_str: String = row.get(3)?;
    let category = Category::from_str(&category_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let primary: f64 = row.get(4)?;
    let secondary: Option<f64> = row.get(5)?;

    let reading = match (category, secondary) {
        (Category::BloodPressure, Some(diastolic)) => ReadingValue::BloodPressure {
            systolic: primary,
            diastolic,
        },
        _ => ReadingValue::Scalar(primary),
    };

    Ok(ClinicalReading {
        id: uuid_column(row, 0)?,
        patient_id: uuid_column(row, 1)?,
        date_time: timestamp_column(row, 2)?,
        category,
        reading,
        nurse_name: row.get(6)?,
        reading_type: row.get(7)?,
        created_at: timestamp_column(row, 8)?,
    })
}
