//! Core domain logic for the cradlelog shared infant-care log.
//!
//! This crate holds everything about a caregiving record that is true
//! regardless of how it arrives or where it is stored: the closed set of
//! event categories, the timestamp normalization applied to every submitted
//! time, and the validation of caregiver names. It performs no I/O and knows
//! nothing about HTTP or SQL; the `cradlelog-api` and `cradlelog-server`
//! crates build on it.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`event`] | The fixed event enumeration: [`EventKind`] and its wire strings |
//! | [`timestamp`] | Interchange-format parsing and storage-format normalization |
//! | [`validation`] | Caregiver-name validation via [`validate_caregiver_name`] |
//!
//! # Quick start
//!
//! ```rust
//! use cradlelog::{normalize_timestamp, validate_caregiver_name, EventKind};
//!
//! let event: EventKind = "餵奶".parse().expect("known event");
//! assert_eq!(event, EventKind::Feeding);
//!
//! // An explicit offset is dropped, never shifted: the caregiver's
//! // wall-clock fields are what gets stored.
//! let time = normalize_timestamp("2024-01-01T10:00:00+08:00").unwrap();
//! assert_eq!(time, "2024-01-01 10:00:00");
//!
//! let name = validate_caregiver_name("  媽媽  ").unwrap();
//! assert_eq!(name, "媽媽");
//! ```

pub mod event;
pub mod timestamp;
pub mod validation;

pub use event::{EventKind, EventParseError};
pub use timestamp::{normalize_timestamp, TimestampError, STORAGE_TIME_FORMAT};
pub use validation::{validate_caregiver_name, ValidationError};
