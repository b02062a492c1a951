//! Record handlers — list, get, create, update, delete.
//!
//! Validation order on writes: required fields, then event membership, then
//! timestamp normalization, then caregiver resolution. Everything is checked
//! before the first storage write.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use cradlelog::{normalize_timestamp, validate_caregiver_name, EventKind};
use cradlelog_api::{
    CreateRecordRequest, RecordIdResponse, RecordResponse, UpdateRecordRequest,
};

use crate::{
    error::{AppError, MSG_RECORD_NOT_FOUND},
    identity,
    storage::{NewRecord, RecordFilter, RecordPatch, StoredRecord},
};

use super::AppState;

const MSG_CREATE_REQUIRED: &str = "caregiver_name, time, event are required";
const MSG_UPDATE_REQUIRED: &str = "time and event are required";
const MSG_EMPTY_NAME: &str = "caregiver_name cannot be empty";
const MSG_BAD_EVENT: &str = "event must be 餵奶/擠奶/大便/小便";
const MSG_BAD_TIME: &str = "time must be a valid date-time";
const MSG_UNKNOWN_CAREGIVER: &str = "照顧者不存在";

/// Query parameters for `GET /api/records`.
///
/// At most one of the two filters is meaningful; when both are present the
/// result is their intersection.
#[derive(Debug, Deserialize, Default)]
pub struct RecordQueryParams {
    pub caregiver_id: Option<i64>,
    pub caregiver_name: Option<String>,
}

fn to_response(r: StoredRecord) -> RecordResponse {
    RecordResponse {
        record_id: r.record_id,
        caregiver_id: r.caregiver_id,
        caregiver_name: r.caregiver_name,
        time: r.time,
        event: r.event,
        notes: r.notes,
    }
}

// ---------------------------------------------------------------------------
// GET /api/records
// ---------------------------------------------------------------------------

/// `GET /api/records` — all records, most recent first, optionally filtered
/// to one caregiver by id or by name. No pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RecordQueryParams>,
) -> Result<Json<Vec<RecordResponse>>, AppError> {
    let filter = RecordFilter {
        caregiver_id: params.caregiver_id,
        caregiver_name: params.caregiver_name,
    };
    let records = state.storage.list_records(&filter).await?;
    Ok(Json(records.into_iter().map(to_response).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/records/:id
// ---------------------------------------------------------------------------

/// `GET /api/records/{id}` — retrieve one record.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecordResponse>, AppError> {
    let record = state
        .storage
        .get_record(id)
        .await?
        .ok_or_else(|| AppError::NotFound(MSG_RECORD_NOT_FOUND.into()))?;
    Ok(Json(to_response(record)))
}

// ---------------------------------------------------------------------------
// POST /api/records
// ---------------------------------------------------------------------------

/// `POST /api/records` — log a new event.
///
/// The caregiver reference is either `caregiver_id` (must already exist) or
/// `caregiver_name` (resolved, creating the caregiver on first use).
/// `time` is normalized into the storage representation before insertion;
/// the sender's wall-clock fields are preserved, never shifted to UTC.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<Json<RecordIdResponse>, AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest(MSG_CREATE_REQUIRED.into()))?;

    let (Some(time_raw), Some(event_raw)) = (body.time.as_deref(), body.event.as_deref()) else {
        return Err(AppError::BadRequest(MSG_CREATE_REQUIRED.into()));
    };

    let event: EventKind = event_raw
        .parse()
        .map_err(|_| AppError::BadRequest(MSG_BAD_EVENT.into()))?;
    let time = normalize_timestamp(time_raw)
        .map_err(|_| AppError::BadRequest(MSG_BAD_TIME.into()))?;

    let caregiver_id = match (body.caregiver_id, body.caregiver_name.as_deref()) {
        (Some(id), _) => {
            state
                .storage
                .get_caregiver(id)
                .await?
                .ok_or_else(|| AppError::BadRequest(MSG_UNKNOWN_CAREGIVER.into()))?;
            id
        }
        (None, Some(raw)) => {
            let name = validate_caregiver_name(raw)
                .map_err(|_| AppError::BadRequest(MSG_EMPTY_NAME.into()))?;
            identity::resolve_or_create(state.storage.as_ref(), name).await?
        }
        (None, None) => return Err(AppError::BadRequest(MSG_CREATE_REQUIRED.into())),
    };

    let record_id = state
        .storage
        .insert_record(&NewRecord {
            caregiver_id,
            time,
            event,
            notes: body.notes.unwrap_or_default(),
        })
        .await?;

    Ok(Json(RecordIdResponse { record_id }))
}

// ---------------------------------------------------------------------------
// PUT /api/records/:id
// ---------------------------------------------------------------------------

/// `PUT /api/records/{id}` — full replace of `time`, `event`, and `notes`
/// (a missing `notes` resets it to empty). The caregiver association is
/// immutable.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> Result<Json<RecordIdResponse>, AppError> {
    let Json(body) = body.map_err(|_| AppError::BadRequest(MSG_UPDATE_REQUIRED.into()))?;

    let (Some(time_raw), Some(event_raw)) = (body.time.as_deref(), body.event.as_deref()) else {
        return Err(AppError::BadRequest(MSG_UPDATE_REQUIRED.into()));
    };

    let event: EventKind = event_raw
        .parse()
        .map_err(|_| AppError::BadRequest(MSG_BAD_EVENT.into()))?;
    let time = normalize_timestamp(time_raw)
        .map_err(|_| AppError::BadRequest(MSG_BAD_TIME.into()))?;

    state
        .storage
        .update_record(
            id,
            &RecordPatch {
                time,
                event,
                notes: body.notes.unwrap_or_default(),
            },
        )
        .await?;

    Ok(Json(RecordIdResponse { record_id: id }))
}

// ---------------------------------------------------------------------------
// DELETE /api/records/:id
// ---------------------------------------------------------------------------

/// `DELETE /api/records/{id}` — remove one record. Deleting a record that
/// does not exist is a 404, the second delete included.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecordIdResponse>, AppError> {
    state.storage.delete_record(id).await?;
    Ok(Json(RecordIdResponse { record_id: id }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::router::build_router;
    use crate::storage::memory::MemoryStorage;

    fn build_app() -> axum::Router {
        build_router(Arc::new(MemoryStorage::new()))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_preserves_wall_clock_time() {
        let app = build_app();

        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/records",
                r#"{"caregiver_name":"媽媽","time":"2024-01-01T10:00:00+08:00","event":"餵奶"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let created = body_json(resp).await;
        let id = created["record_id"].as_i64().unwrap();

        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/records/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let record = body_json(resp).await;
        assert_eq!(record["event"], "餵奶");
        assert_eq!(record["caregiver_name"], "媽媽");
        assert_eq!(record["time"], "2024-01-01 10:00:00");
    }

    #[tokio::test]
    async fn create_rejects_unknown_event() {
        let resp = build_app()
            .oneshot(json_request(
                "POST",
                "/api/records",
                r#"{"caregiver_name":"媽媽","time":"2024-01-01 10:00:00","event":"洗澡"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err = body_json(resp).await;
        assert_eq!(err["message"], "event must be 餵奶/擠奶/大便/小便");
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_and_unknown_caregiver_id() {
        let app = build_app();

        let resp = app
            .clone()
            .oneshot(json_request("POST", "/api/records", r#"{"event":"餵奶"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app
            .oneshot(json_request(
                "POST",
                "/api/records",
                r#"{"caregiver_id":42,"time":"2024-01-01 10:00:00","event":"餵奶"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_and_delete_missing_record_return_404() {
        let app = build_app();

        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/records/999",
                r#"{"time":"2024-01-01 10:00:00","event":"擠奶"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/records/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let err = body_json(resp).await;
        assert_eq!(err["message"], "記錄不存在");
    }

    #[tokio::test]
    async fn update_rejects_unknown_event() {
        let app = build_app();
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/records",
                r#"{"caregiver_name":"媽媽","time":"2024-01-01 10:00:00","event":"餵奶"}"#,
            ))
            .await
            .unwrap();
        let id = body_json(resp).await["record_id"].as_i64().unwrap();

        let resp = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/records/{id}"),
                r#"{"time":"2024-01-01 11:00:00","event":"bath"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_by_caregiver_name() {
        let app = build_app();
        for (name, time) in [("媽媽", "2024-01-01 08:00:00"), ("爸爸", "2024-01-01 09:00:00")] {
            let resp = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/records",
                    &format!(r#"{{"caregiver_name":"{name}","time":"{time}","event":"餵奶"}}"#),
                ))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/records?caregiver_name=%E5%AA%BD%E5%AA%BD")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = body_json(resp).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["caregiver_name"], "媽媽");
    }
}
