//! Patient endpoints.
//!
//! - `GET /patients` — list all patients
//! - `POST /patients` — admit a patient
//! - `GET /patients/:id` — one patient

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_patient_id, ApiContext};
use crate::db;
use crate::models::{NewPatient, Patient};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.db()?;
    let patients = db::list_patients(&conn)?;
    Ok(Json(patients))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(input) = payload?;
    let patient = input.into_patient()?;

    let conn = ctx.db()?;
    db::insert_patient(&conn, &patient)?;

    tracing::info!(patient_id = %patient.id, department = %patient.department, "Patient created");
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let patient_id = parse_patient_id(&id)?;
    let conn = ctx.db()?;
    let patient = db::get_patient(&conn, &patient_id)?
        .ok_or_else(|| ApiError::patient_not_found(&id))?;
    Ok(Json(patient))
}
