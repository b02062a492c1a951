//! Public surface for the `cradlelog-server` crate.
//!
//! Exposes the router builder, config, and storage types so that external
//! crates (e.g. the conformance test suite) can spin up an in-process
//! server without spawning a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod router;
pub mod storage;

pub use config::AppConfig;
pub use identity::resolve_or_create;
pub use router::build_router;
pub use storage::{memory::MemoryStorage, sqlite::SqliteStorage, Storage};
