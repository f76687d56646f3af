//! Clinical reading endpoints.
//!
//! - `GET /patients/:id/tests` — all readings, newest first
//! - `POST /patients/:id/tests` — record a reading
//! - `GET /patients/:id/tests/latest` — latest per category + assessment

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{parse_patient_id, ApiContext};
use crate::db;
use crate::models::{ClinicalReading, LatestReadings, NewReading};
use crate::triage::{self, Assessment};

#[derive(Serialize)]
pub struct LatestResponse {
    pub patient_id: Uuid,
    pub latest: LatestReadings,
    pub assessment: Assessment,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ClinicalReading>>, ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let conn = ctx.db()?;
    db::require_patient(&conn, &patient_id)?;
    let readings = db::get_readings_for_patient(&conn, &patient_id)?;
    Ok(Json(readings))
}

pub async fn record(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<NewReading>, JsonRejection>,
) -> Result<(StatusCode, Json<ClinicalReading>), ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let Json(input) = payload?;
    let reading = input.into_reading(patient_id)?;

    let conn = ctx.db()?;
    db::require_patient(&conn, &patient_id)?;
    db::insert_reading(&conn, &reading)?;

    tracing::info!(
        %patient_id,
        category = %reading.category,
        value = reading.reading.primary(),
        "Clinical reading recorded"
    );
    Ok((StatusCode::CREATED, Json(reading)))
}

pub async fn latest(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<LatestResponse>, ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let conn = ctx.db()?;
    db::require_patient(&conn, &patient_id)?;
    let latest = db::get_latest_readings(&conn, &patient_id)?;
    let assessment = triage::assess(&latest);

    Ok(Json(LatestResponse {
        patient_id,
        latest,
        assessment,
    }))
}
