//! Login and user creation.
//!
//! - `POST /login` — plaintext username/password check
//! - `POST /user` — create a login

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{LoginRequest, NewUser, User};

pub async fn login(
    State(ctx): State<ApiContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(input) = payload?;
    let (username, password) = input.into_credentials()?;

    let conn = ctx.db()?;
    match db::find_user_by_username(&conn, &username)? {
        Some(user) if user.password_matches(&password) => {
            tracing::info!(username = %user.username, role = %user.role, "Login succeeded");
            Ok(Json(user))
        }
        _ => {
            tracing::info!(%username, "Login rejected");
            Err(ApiError::Unauthorized)
        }
    }
}

pub async fn create_user(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(input) = payload?;
    let user = input.into_user()?;

    let conn = ctx.db()?;
    db::insert_user(&conn, &user)?;

    tracing::info!(username = %user.username, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}
