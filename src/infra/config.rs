//! Centralized configuration (environment variables + defaults).

use crate::storage::pets::DB_NAME;

/// SQLite database URL. Defaults to `sqlite://shelter.db` in the working directory.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| format!("sqlite://{}", DB_NAME))
}

/// Pool size for file-backed databases.
pub fn database_max_connections() -> u32 {
    std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(5)
        .max(1)
}

/// Address the HTTP API listens on.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Default log filter when `RUST_LOG` is not set.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
