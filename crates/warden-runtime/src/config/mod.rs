//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌───────────────────────────────────────────┐
//! │  1. Environment Variables (WARDEN_*)      │  Runtime override
//! ├───────────────────────────────────────────┤
//! │  2. Project Config (.warden/config.toml)  │  Deployment-specific
//! ├───────────────────────────────────────────┤
//! │  3. Global Config (~/.warden/config.toml) │  Operator defaults
//! ├───────────────────────────────────────────┤
//! │  4. Default Values (compile-time)         │  Fallback
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `WARDEN_DEBUG` | `debug` | bool |
//! | `WARDEN_ROOT_PATH` | `guard.root_path` | path |
//! | `WARDEN_LOGIN_PATH` | `guard.login_path` | path |
//! | `WARDEN_DENIED_MESSAGE` | `guard.denied_message` | String |
//! | `WARDEN_LOG_LEVEL` | `log.level` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! # <project>/.warden/config.toml
//! debug = false
//!
//! [guard]
//! root_path = "/"
//! login_path = "/login"
//! denied_message = "You do not have permission to access this page"
//!
//! [log]
//! level = "warn"
//!
//! # Optional: replaces the built-in section catalog entirely.
//! [[catalog]]
//! path = "/"
//! label = "Dashboard"
//! actions = ["view", "edit"]
//!
//! [[catalog]]
//! path = "/rides"
//! label = "Ride Management"
//! actions = ["view", "create", "edit", "delete", "assign"]
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{
    CatalogEntryConfig, ConfigLayer, GuardConfig, GuardLayer, LogConfig, LogLayer, WardenConfig,
};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".warden")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".warden";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
