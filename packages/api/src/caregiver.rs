//! Caregiver login types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/caregivers/login`.
///
/// "Login" is identity resolution: the server looks the trimmed name up and
/// creates a caregiver row on first use. There is no password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub caregiver_name: Option<String>,
}

/// Response body for a successful login: the stable caregiver id for the
/// submitted name, the same id on every subsequent login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub caregiver_id: i64,
}
