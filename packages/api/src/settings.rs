//! Shared reminder-settings types.

use serde::{Deserialize, Serialize};

/// Default feeding reminder interval (minutes), used when no settings row
/// has ever been written.
pub const DEFAULT_FEEDING_INTERVAL: i64 = 180;

/// Default pumping reminder interval (minutes).
pub const DEFAULT_PUMPING_INTERVAL: i64 = 240;

/// The `last_modified_by` value reported while settings are defaulted.
pub const DEFAULT_MODIFIED_BY: &str = "System";

/// Response body for `GET /api/settings`.
///
/// Reflects the single shared settings row, or the documented defaults when
/// nobody has written one yet — the defaults are synthesized per request and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsResponse {
    pub feeding_interval: i64,
    pub pumping_interval: i64,
    pub last_modified_by: String,
    pub updated_at: String,
}

impl SettingsResponse {
    /// The defaulted view, stamped with the given `updated_at`.
    pub fn defaults(updated_at: impl Into<String>) -> Self {
        Self {
            feeding_interval: DEFAULT_FEEDING_INTERVAL,
            pumping_interval: DEFAULT_PUMPING_INTERVAL,
            last_modified_by: DEFAULT_MODIFIED_BY.into(),
            updated_at: updated_at.into(),
        }
    }
}

/// Request body for `PUT /api/settings` — a full replace of the shared row.
///
/// `caregiver_name` identifies who is writing; it is stored as
/// `last_modified_by` for audit display only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub feeding_interval: Option<i64>,
    #[serde(default)]
    pub pumping_interval: Option<i64>,
    #[serde(default)]
    pub caregiver_name: Option<String>,
}

/// Response body for a successful settings write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = SettingsResponse::defaults("2024-01-01T00:00:00Z");
        assert_eq!(s.feeding_interval, 180);
        assert_eq!(s.pumping_interval, 240);
        assert_eq!(s.last_modified_by, "System");
    }
}
