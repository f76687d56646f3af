//! `GET /critical-patients` — patients whose latest readings breach a
//! critical threshold.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{LatestReadings, Patient};
use crate::triage;

#[derive(Serialize)]
pub struct CriticalPatient {
    pub patient: Patient,
    /// Breached thresholds joined with "; ".
    pub reason: String,
    pub reasons: Vec<String>,
    pub latest: LatestReadings,
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<CriticalPatient>>, ApiError> {
    let conn = ctx.db()?;
    let latest_by_patient = db::get_latest_readings_all(&conn)?;

    let mut critical = Vec::new();
    for (patient_id, latest) in latest_by_patient {
        let assessment = triage::assess(&latest);
        if !assessment.critical {
            continue;
        }
        let Some(patient) = db::get_patient(&conn, &patient_id)? else {
            tracing::warn!(%patient_id, "Readings reference a missing patient");
            continue;
        };
        critical.push(CriticalPatient {
            reason: assessment.reason(),
            reasons: assessment.reasons,
            patient,
            latest,
        });
    }

    tracing::debug!(count = critical.len(), "Critical patients evaluated");
    Ok(Json(critical))
}
