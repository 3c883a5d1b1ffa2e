//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

/// Bind address for the API server. 9006 is the service's historical port.
pub fn bind_addr() -> String {
    std::env::var("TITANIC_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9006".to_string())
}

/// Optional CSV seed. When set, the server loads the file into the store at
/// startup; when unset, the store starts empty.
pub fn dataset_path() -> Option<PathBuf> {
    std::env::var("TITANIC_DATASET").ok().map(PathBuf::from)
}
