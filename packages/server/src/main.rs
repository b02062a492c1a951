//! `cradlelog-server` — HTTP backend for the shared infant-care log.
//!
//! # Quick start
//!
//! ```sh
//! # In-memory server on the default port:
//! cradlelog-server
//!
//! # Persistent SQLite server with the household roster seeded:
//! CRADLELOG_DB=./cradlelog.db \
//! CRADLELOG_SEED_CAREGIVERS=阿公,阿嬤,爸爸,媽媽 cradlelog-server
//!
//! # Custom bind address:
//! CRADLELOG_BIND=0.0.0.0:8080 cradlelog-server
//! ```
//!
//! # Environment variables
//!
//! See [`AppConfig::from_env`] for the full list.

use std::sync::Arc;

use cradlelog_server::{
    build_router, identity, AppConfig, MemoryStorage, SqliteStorage, Storage,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cradlelog_server=info,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env();

    let storage: Arc<dyn Storage> = match &config.db_path {
        Some(path) => {
            tracing::info!("storage: SQLite at {path}");
            Arc::new(
                SqliteStorage::open(path)
                    .unwrap_or_else(|e| panic!("failed to open SQLite database at {path}: {e}")),
            )
        }
        None => {
            tracing::info!("storage: in-memory (data will not survive restart)");
            Arc::new(MemoryStorage::new())
        }
    };

    // Seed the household roster; resolution is idempotent, so restarting
    // never duplicates anyone.
    for name in &config.seed_caregivers {
        match identity::resolve_or_create(storage.as_ref(), name).await {
            Ok(id) => tracing::info!("seed caregiver {name:?} ready (id {id})"),
            Err(e) => tracing::warn!("seeding caregiver {name:?} failed: {e}"),
        }
    }

    let app = build_router(Arc::clone(&storage));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app).await.expect("server error");
}
