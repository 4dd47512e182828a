// src/config/mod.rs
// Configuration and shared constants

pub mod env;

pub use env::{ApiConfig, ConfigValidation, EnvConfig};

use std::path::PathBuf;

/// Per-user directory holding the global `.env`
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".productive-mcp"))
}

/// Load `.env` files: the global one first, then the working directory.
/// Variables already set in the environment are never replaced.
pub fn load_dotenv() {
    if let Some(dir) = config_dir() {
        let _ = dotenvy::from_path(dir.join(".env"));
    }
    let _ = dotenvy::dotenv();
}
