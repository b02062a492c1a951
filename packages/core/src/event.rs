//! The fixed enumeration of caregiving event categories.
//!
//! Records carry exactly one [`EventKind`]. The wire strings are the
//! Traditional Chinese labels the household writes and reads; they are
//! matched exactly, never coerced or case-folded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The category of a logged caregiving event.
///
/// Serialises as its Chinese wire-format string (e.g. `"餵奶"`), the same
/// value stored in the `records.event` column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A feeding (餵奶).
    #[serde(rename = "餵奶")]
    Feeding,
    /// A pumping session (擠奶).
    #[serde(rename = "擠奶")]
    Pumping,
    /// A stool diaper change (大便).
    #[serde(rename = "大便")]
    Stool,
    /// A urination diaper change (小便).
    #[serde(rename = "小便")]
    Urination,
}

/// Error returned when a string is not one of the fixed event values.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown event {0:?}; expected one of: 餵奶, 擠奶, 大便, 小便")]
pub struct EventParseError(pub String);

impl EventKind {
    /// Every member of the enumeration, in schema order.
    pub const ALL: [EventKind; 4] = [
        EventKind::Feeding,
        EventKind::Pumping,
        EventKind::Stool,
        EventKind::Urination,
    ];

    /// The wire-format string for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Feeding => "餵奶",
            EventKind::Pumping => "擠奶",
            EventKind::Stool => "大便",
            EventKind::Urination => "小便",
        }
    }
}

/// Formats the event as its wire-format string (e.g. `"餵奶"`).
impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an [`EventKind`] from its exact wire-format string.
///
/// Returns `Err` for anything outside the fixed set, including near-misses
/// with surrounding whitespace.
impl std::str::FromStr for EventKind {
    type Err = EventParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "餵奶" => Ok(EventKind::Feeding),
            "擠奶" => Ok(EventKind::Pumping),
            "大便" => Ok(EventKind::Stool),
            "小便" => Ok(EventKind::Urination),
            _ => Err(EventParseError(s.to_string())),
        }
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_member() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn rejects_unknown_and_padded_values() {
        assert!("洗澡".parse::<EventKind>().is_err());
        assert!("feeding".parse::<EventKind>().is_err());
        assert!(" 餵奶".parse::<EventKind>().is_err());
        assert!("".parse::<EventKind>().is_err());
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&EventKind::Stool).unwrap();
        assert_eq!(json, "\"大便\"");
        let back: EventKind = serde_json::from_str("\"擠奶\"").unwrap();
        assert_eq!(back, EventKind::Pumping);
    }

    #[test]
    fn serde_rejects_unknown_values() {
        assert!(serde_json::from_str::<EventKind>("\"洗澡\"").is_err());
    }
}
