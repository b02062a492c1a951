//! Caregiver login handler — `POST /api/caregivers/login`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use cradlelog::validate_caregiver_name;
use cradlelog_api::{LoginRequest, LoginResponse};

use crate::{error::AppError, identity};

use super::AppState;

const MSG_EMPTY_NAME: &str = "照顧者名稱不能為空";

/// `POST /api/caregivers/login`
///
/// Resolves the submitted name to a stable caregiver id, creating the
/// caregiver on first use. There is no password; the household shares one
/// log and names are the only identity.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest(MSG_EMPTY_NAME.into()))?;

    let name = validate_caregiver_name(body.caregiver_name.as_deref().unwrap_or(""))
        .map_err(|_| AppError::BadRequest(MSG_EMPTY_NAME.into()))?;

    let caregiver_id = identity::resolve_or_create(state.storage.as_ref(), name).await?;
    Ok(Json(LoginResponse { caregiver_id }))
}
