//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use warden_auth::{CatalogEntry, ResourceCatalog};
use warden_types::{Action, ResourcePath};

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use warden_runtime::config::WardenConfig;
///
/// let config = WardenConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.guard.login_path.as_str(), "/login");
/// assert_eq!(config.catalog().unwrap().entries().len(), 13);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WardenConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Access guard settings.
    pub guard: GuardConfig,

    /// Section catalog. `None` means the built-in dashboard catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<CatalogEntryConfig>>,

    /// Logging settings.
    pub log: LogConfig,
}

impl WardenConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Builds the configured catalog, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] for duplicate paths or entries
    /// without actions.
    pub fn catalog(&self) -> Result<ResourceCatalog, ConfigError> {
        match &self.catalog {
            None => Ok(ResourceCatalog::dashboard()),
            Some(entries) => {
                let entries = entries
                    .iter()
                    .map(|e| CatalogEntry::new(e.path.clone(), e.label.clone(), &e.actions))
                    .collect();
                Ok(ResourceCatalog::from_entries(entries)?)
            }
        }
    }

    /// Overlays `layer` onto this config.
    ///
    /// Only keys the layer actually set are copied, so a higher layer can
    /// put a value back to its default.
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(debug) = layer.debug {
            self.debug = debug;
        }
        if layer.catalog.is_some() {
            self.catalog = layer.catalog;
        }
        self.guard.apply(layer.guard);
        if let Some(level) = layer.log.level {
            self.log.level = level;
        }
    }
}

/// Access guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Landing page; always viewable once authenticated.
    pub root_path: ResourcePath,

    /// Login entry point for unauthenticated navigation.
    pub login_path: ResourcePath,

    /// Message attached to the redirect after a denied navigation.
    pub denied_message: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            root_path: ResourcePath::root(),
            login_path: ResourcePath::new("/login").unwrap_or_else(|_| ResourcePath::root()),
            denied_message: "You do not have permission to access this page".into(),
        }
    }
}

impl GuardConfig {
    fn apply(&mut self, layer: GuardLayer) {
        if let Some(root_path) = layer.root_path {
            self.root_path = root_path;
        }
        if let Some(login_path) = layer.login_path {
            self.login_path = login_path;
        }
        if let Some(denied_message) = layer.denied_message {
            self.denied_message = denied_message;
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

/// One `[[catalog]]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntryConfig {
    pub path: ResourcePath,
    pub label: String,
    pub actions: Vec<Action>,
}

/// One configuration source with only the keys it sets.
///
/// Files and the environment each produce a layer; the loader applies
/// them in priority order onto [`WardenConfig::default`].
///
/// # Example
///
/// ```
/// use warden_runtime::config::{ConfigLayer, WardenConfig};
///
/// let mut config = WardenConfig::default();
/// config.apply(ConfigLayer::from_toml("debug = true").unwrap());
/// config.apply(ConfigLayer::from_toml("debug = false").unwrap());
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    pub debug: Option<bool>,
    pub guard: GuardLayer,
    pub catalog: Option<Vec<CatalogEntryConfig>>,
    pub log: LogLayer,
}

impl ConfigLayer {
    /// Parses a layer from TOML.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// `[guard]` keys of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuardLayer {
    pub root_path: Option<ResourcePath>,
    pub login_path: Option<ResourcePath>,
    pub denied_message: Option<String>,
}

/// `[log]` keys of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogLayer {
    pub level: Option<String>,
}
