//! Shared settings handlers — `GET /api/settings`, `PUT /api/settings`.
//!
//! One logical row for the whole household. A read before any write returns
//! the documented defaults without persisting them; every write is a full
//! upsert keyed on the sentinel, so read-before-write is never needed.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{SecondsFormat, Utc};

use cradlelog::validate_caregiver_name;
use cradlelog_api::{AckResponse, SettingsResponse, UpdateSettingsRequest};

use crate::{error::AppError, storage::SettingsUpdate};

use super::AppState;

const MSG_SETTINGS_REQUIRED: &str =
    "feeding_interval, pumping_interval, and caregiver_name (modifier) are required";

/// `GET /api/settings`
///
/// Returns the shared settings row, or the defaults (180 / 240 / "System")
/// stamped with the current time when nobody has written one yet.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    match state.storage.get_settings().await? {
        Some(s) => Ok(Json(SettingsResponse {
            feeding_interval: s.feeding_interval,
            pumping_interval: s.pumping_interval,
            last_modified_by: s.last_modified_by,
            updated_at: s.updated_at,
        })),
        None => Ok(Json(SettingsResponse::defaults(
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        ))),
    }
}

/// `PUT /api/settings`
///
/// Full replace of the shared row: both intervals and the writer's name are
/// required; `updated_at` is stamped by the store.
pub async fn put_settings(
    State(state): State<AppState>,
    body: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest(MSG_SETTINGS_REQUIRED.into()))?;

    let (Some(feeding_interval), Some(pumping_interval)) =
        (body.feeding_interval, body.pumping_interval)
    else {
        return Err(AppError::BadRequest(MSG_SETTINGS_REQUIRED.into()));
    };
    let modified_by = validate_caregiver_name(body.caregiver_name.as_deref().unwrap_or(""))
        .map_err(|_| AppError::BadRequest(MSG_SETTINGS_REQUIRED.into()))?;

    state
        .storage
        .put_settings(&SettingsUpdate {
            feeding_interval,
            pumping_interval,
            modified_by: modified_by.to_string(),
        })
        .await?;

    Ok(Json(AckResponse::ok()))
}
