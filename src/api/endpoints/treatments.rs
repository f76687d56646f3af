//! Treatment endpoints.
//!
//! - `GET /patients/:id/treatments`
//! - `POST /patients/:id/treatments`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_patient_id, ApiContext};
use crate::db;
use crate::models::{NewTreatment, TreatmentRecord};

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TreatmentRecord>>, ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let conn = ctx.db()?;
    db::require_patient(&conn, &patient_id)?;
    let treatments = db::get_treatments_for_patient(&conn, &patient_id)?;
    Ok(Json(treatments))
}

pub async fn record(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<NewTreatment>, JsonRejection>,
) -> Result<(StatusCode, Json<TreatmentRecord>), ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let Json(input) = payload?;
    let record = input.into_record(patient_id)?;

    let conn = ctx.db()?;
    db::require_patient(&conn, &patient_id)?;
    db::insert_treatment(&conn, &record)?;

    tracing::info!(%patient_id, treatment_id = %record.id, "Treatment recorded");
    Ok((StatusCode::CREATED, Json(record)))
}
