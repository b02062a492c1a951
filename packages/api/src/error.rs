//! The JSON body returned for every error response.

use serde::{Deserialize, Serialize};

/// A single human-readable message, localized to the household's working
/// language. No machine-readable codes are exposed; clients branch on the
/// HTTP status alone.
///
/// ```json
/// { "message": "記錄不存在" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let e = ErrorResponse::new("記錄不存在");
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"message":"記錄不存在"}"#);
        let back: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
