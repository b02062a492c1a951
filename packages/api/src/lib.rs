//! Request and response types for the cradlelog HTTP API.
//!
//! This crate encodes the JSON contract between the server and its clients
//! as Rust types. Request bodies keep every field optional so the handlers
//! own the missing-field policy (and its localized messages) instead of the
//! deserializer.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | POST | `/api/caregivers/login` | [`LoginRequest`] → [`LoginResponse`] |
//! | GET | `/api/records` | → `Vec<`[`RecordResponse`]`>` |
//! | GET | `/api/records/{id}` | → [`RecordResponse`] |
//! | POST | `/api/records` | [`CreateRecordRequest`] → [`RecordIdResponse`] |
//! | PUT | `/api/records/{id}` | [`UpdateRecordRequest`] → [`RecordIdResponse`] |
//! | DELETE | `/api/records/{id}` | → [`RecordIdResponse`] |
//! | GET | `/api/settings` | → [`SettingsResponse`] |
//! | PUT | `/api/settings` | [`UpdateSettingsRequest`] → [`AckResponse`] |
//!
//! Every failure, on any endpoint, is an [`ErrorResponse`].

pub mod caregiver;
pub mod error;
pub mod record;
pub mod settings;

pub use caregiver::{LoginRequest, LoginResponse};
pub use error::ErrorResponse;
pub use record::{CreateRecordRequest, RecordIdResponse, RecordResponse, UpdateRecordRequest};
pub use settings::{AckResponse, SettingsResponse, UpdateSettingsRequest};
