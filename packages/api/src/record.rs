//! Record submission, retrieval, and listing types.

use cradlelog::EventKind;
use serde::{Deserialize, Serialize};

/// One logged caregiving event, as returned by every record read.
///
/// Reads join the caregiver table, so both the id and the display name are
/// always present. `time` is in the storage representation
/// (`YYYY-MM-DD HH:MM:SS`); `event` serialises as its Chinese wire string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordResponse {
    pub record_id: i64,
    pub caregiver_id: i64,
    pub caregiver_name: String,
    pub time: String,
    pub event: EventKind,
    pub notes: String,
}

/// Request body for `POST /api/records`.
///
/// The caregiver reference is either `caregiver_id` (must already exist) or
/// `caregiver_name` (resolved, creating the caregiver on first use). `time`
/// may be in any accepted interchange format; `event` must be an exact
/// member of the fixed enumeration. `event` stays a raw string here so the
/// handler can reject unknown values with the documented 400 message rather
/// than a deserializer error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(default)]
    pub caregiver_id: Option<i64>,
    #[serde(default)]
    pub caregiver_name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for `PUT /api/records/{id}` — a full replace of `time`,
/// `event`, and `notes` (a missing `notes` resets it to empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response body for create, update, and delete: the affected record id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordIdResponse {
    pub record_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialises_event_as_wire_string() {
        let r = RecordResponse {
            record_id: 7,
            caregiver_id: 1,
            caregiver_name: "媽媽".into(),
            time: "2024-01-01 10:00:00".into(),
            event: EventKind::Feeding,
            notes: String::new(),
        };
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["event"], "餵奶");
        assert_eq!(v["record_id"], 7);
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateRecordRequest = serde_json::from_str("{}").unwrap();
        assert!(req.caregiver_id.is_none());
        assert!(req.caregiver_name.is_none());
        assert!(req.time.is_none());
        assert!(req.event.is_none());
        assert!(req.notes.is_none());
    }
}
