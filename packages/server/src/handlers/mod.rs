//! HTTP request handlers for all cradlelog endpoints.
//!
//! Each submodule covers one resource. Handlers are pure async functions
//! that receive Axum extractors and return `Result<impl IntoResponse,
//! AppError>`. All validation (required fields, event membership, timestamp
//! normalization) lives here, before any storage call; storage never sees
//! unvalidated input.

pub mod caregivers;
pub mod health;
pub mod records;
pub mod settings;

use std::sync::Arc;

use crate::storage::Storage;

/// Shared application state threaded through all Axum handlers via
/// [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}
