//! Server configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for the cradlelog server.
///
/// All fields are populated from environment variables with sensible
/// defaults, so the server can be started with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `CRADLELOG_BIND` | `0.0.0.0:5000` | TCP socket address to listen on |
/// | `CRADLELOG_DB` | (absent = in-memory) | Path to the SQLite database file |
/// | `CRADLELOG_SEED_CAREGIVERS` | (absent) | Comma-separated caregiver names created idempotently at startup |
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    /// Path to the SQLite database file.
    /// `None` means use an in-memory store (data is lost on restart).
    pub db_path: Option<String>,

    /// Caregiver names to resolve-or-create at startup, e.g. the household
    /// roster `阿公,阿嬤,爸爸,媽媽`. Resolution is idempotent, so restarts
    /// never duplicate anyone.
    pub seed_caregivers: Vec<String>,
}

impl AppConfig {
    /// Populate config from environment variables, applying defaults where
    /// absent. Panics with a descriptive message on malformed values, so a
    /// bad deployment fails at startup rather than mid-request.
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = std::env::var("CRADLELOG_BIND")
            .unwrap_or_else(|_| "0.0.0.0:5000".into())
            .parse()
            .expect("CRADLELOG_BIND must be a valid socket address (e.g. 0.0.0.0:5000)");

        let seed_caregivers = std::env::var("CRADLELOG_SEED_CAREGIVERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_addr,
            db_path: std::env::var("CRADLELOG_DB").ok(),
            seed_caregivers,
        }
    }
}
