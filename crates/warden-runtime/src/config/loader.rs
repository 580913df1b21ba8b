//! Layered configuration loading.
//!
//! Each source yields a [`ConfigLayer`] holding only the keys it sets.
//! Layers are applied onto [`WardenConfig::default`] from lowest to
//! highest priority:
//!
//! ```text
//! defaults ◄── global file ◄── project file ◄── WARDEN_* env
//! ```
//!
//! A missing file contributes nothing. A file that exists but does not
//! parse is an error, as is an env var with an unusable value.

use super::{
    default_config_path, ConfigError, ConfigLayer, WardenConfig, PROJECT_CONFIG_DIR,
    PROJECT_CONFIG_FILE,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use warden_types::ResourcePath;

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayerSource {
    Global,
    Project,
    Env,
}

impl std::fmt::Display for LayerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::Project => "project",
            Self::Env => "env",
        })
    }
}

/// Builds a [`WardenConfig`] from files and the environment.
///
/// # Example
///
/// ```no_run
/// use warden_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/srv/console")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), warden_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Overrides `~/.warden/config.toml`.
    global_config_path: Option<PathBuf>,
    /// Directory holding `.warden/config.toml`.
    project_root: Option<PathBuf>,
    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the global layer from `path` instead of the home directory.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Reads the project layer from `<path>/.warden/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Ignores `WARDEN_*` variables.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Applies every enabled layer in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unreadable or unparseable file, or
    /// an invalid `WARDEN_*` value.
    pub fn load(&self) -> Result<WardenConfig, ConfigError> {
        let mut config = WardenConfig::default();
        for (source, layer) in self.layers()? {
            debug!(source = %source, "applying config layer");
            config.apply(layer);
        }
        Ok(config)
    }

    fn layers(&self) -> Result<Vec<(LayerSource, ConfigLayer)>, ConfigError> {
        let mut layers = Vec::with_capacity(3);

        if !self.skip_global {
            let path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);
            if let Some(layer) = read_layer(&path)? {
                layers.push((LayerSource::Global, layer));
            }
        }

        if let (false, Some(root)) = (self.skip_project, &self.project_root) {
            let path = root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE);
            if let Some(layer) = read_layer(&path)? {
                layers.push((LayerSource::Project, layer));
            }
        }

        if !self.skip_env {
            layers.push((LayerSource::Env, env_layer()?));
        }

        Ok(layers)
    }
}

/// Reads one TOML layer; `None` if the file does not exist.
fn read_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::read_file(path, e)),
    };
    let layer = ConfigLayer::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    debug!(path = %path.display(), "read config file");
    Ok(Some(layer))
}

/// Collects the `WARDEN_*` variables that are set.
fn env_layer() -> Result<ConfigLayer, ConfigError> {
    let mut layer = ConfigLayer {
        debug: env_bool("WARDEN_DEBUG")?,
        ..ConfigLayer::default()
    };
    layer.guard.root_path = env_path("WARDEN_ROOT_PATH")?;
    layer.guard.login_path = env_path("WARDEN_LOGIN_PATH")?;
    layer.guard.denied_message = std::env::var("WARDEN_DENIED_MESSAGE").ok();
    layer.log.level = std::env::var("WARDEN_LOG_LEVEL").ok();
    Ok(layer)
}

fn env_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|raw| {
            parse_bool(&raw).ok_or_else(|| ConfigError::invalid_env_var(name, "expected bool"))
        })
        .transpose()
}

fn env_path(name: &'static str) -> Result<Option<ResourcePath>, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|raw| {
            ResourcePath::new(raw).map_err(|e| ConfigError::invalid_env_var(name, e.to_string()))
        })
        .transpose()
}

/// Accepts true/false, 1/0, yes/no, on/off in any case.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create config dir");
        }
        std::fs::write(path, content).expect("write config");
    }

    fn project_file(root: &TempDir) -> PathBuf {
        root.path().join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE)
    }

    #[test]
    fn nothing_enabled_gives_defaults() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect("load");
        assert_eq!(config, WardenConfig::default());
    }

    #[test]
    fn global_file_applied() {
        let home = TempDir::new().expect("tempdir");
        let global = home.path().join("config.toml");
        write(&global, "debug = true\n\n[guard]\nlogin_path = \"/signin\"\n");

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect("load");

        assert!(config.debug);
        assert_eq!(config.guard.login_path.as_str(), "/signin");
    }

    #[test]
    fn project_overrides_only_what_it_sets() {
        let home = TempDir::new().expect("tempdir");
        let project = TempDir::new().expect("tempdir");
        let global = home.path().join("config.toml");
        write(
            &global,
            "debug = true\n\n[guard]\ndenied_message = \"global message\"\n",
        );
        write(
            &project_file(&project),
            "[guard]\ndenied_message = \"project message\"\n",
        );

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .with_project_root(project.path())
            .skip_env_vars()
            .load()
            .expect("load");

        assert!(config.debug);
        assert_eq!(config.guard.denied_message, "project message");
    }

    #[test]
    fn project_can_restore_defaults_over_global() {
        let home = TempDir::new().expect("tempdir");
        let project = TempDir::new().expect("tempdir");
        let global = home.path().join("config.toml");
        write(&global, "debug = true\n\n[guard]\nroot_path = \"/home\"\n");
        write(
            &project_file(&project),
            "debug = false\n\n[guard]\nroot_path = \"/\"\n",
        );

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .with_project_root(project.path())
            .skip_env_vars()
            .load()
            .expect("load");

        assert!(config.guard.root_path.is_root());
        assert!(!config.debug);
    }

    #[test]
    fn missing_files_contribute_nothing() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .expect("load");
        assert_eq!(config, WardenConfig::default());
    }

    #[test]
    fn broken_file_reports_path() {
        let home = TempDir::new().expect("tempdir");
        let global = home.path().join("config.toml");
        write(&global, "debug = [not toml");

        let err = ConfigLoader::new()
            .with_global_config(&global)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn parse_bool_values() {
        for yes in ["true", "TRUE", "1", "yes", "on"] {
            assert_eq!(parse_bool(yes), Some(true), "input: {yes}");
        }
        for no in ["false", "0", "no", "Off"] {
            assert_eq!(parse_bool(no), Some(false), "input: {no}");
        }
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn env_layer_overrides_files() {
        // Only test in this crate that touches WARDEN_* variables.
        let home = TempDir::new().expect("tempdir");
        let global = home.path().join("config.toml");
        write(&global, "debug = true\n\n[log]\nlevel = \"info\"\n");

        std::env::set_var("WARDEN_DEBUG", "false");
        std::env::set_var("WARDEN_LOGIN_PATH", "/sso");
        std::env::set_var("WARDEN_LOG_LEVEL", "debug");

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .skip_project_config()
            .load();

        std::env::set_var("WARDEN_ROOT_PATH", "");
        let invalid = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .load();

        std::env::remove_var("WARDEN_DEBUG");
        std::env::remove_var("WARDEN_LOGIN_PATH");
        std::env::remove_var("WARDEN_LOG_LEVEL");
        std::env::remove_var("WARDEN_ROOT_PATH");

        let config = config.expect("load");
        assert!(!config.debug);
        assert_eq!(config.guard.login_path.as_str(), "/sso");
        assert_eq!(config.log.level, "debug");
        assert!(matches!(invalid, Err(ConfigError::InvalidEnvVar { .. })));
    }
}
