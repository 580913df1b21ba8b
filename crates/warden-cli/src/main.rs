//! warden CLI - inspect what an admin session may do
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`WARDEN_*`)
//! 3. Project config (`.warden/config.toml` in the project directory)
//! 4. Global config (`~/.warden/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Session
//!
//! `--session <file>` points at a saved admin login response. Without it
//! every command runs unauthenticated.
//!
//! # Environment Variables
//!
//! - `WARDEN_DEBUG`: Enable debug logging (`true`/`false`)
//! - `WARDEN_ROOT_PATH`: Landing page path
//! - `WARDEN_LOGIN_PATH`: Login entry point path
//! - `WARDEN_DENIED_MESSAGE`: Message shown after a denied navigation
//! - `WARDEN_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use warden_auth::{all_actions_for_path, ResourceCatalog, Role};
use warden_runtime::config::{ConfigLoader, WardenConfig};
use warden_runtime::{
    AccessGuard, LoginResponse, NavigationRequest, RecordingNavigator, SessionContext,
};
use warden_types::{Action, ResourcePath};

/// warden CLI - inspect what an admin session may do
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long)]
    project: Option<PathBuf>,

    /// Saved login response to evaluate against
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single action on a path (prints allowed / denied)
    Check {
        /// Resource path, e.g. /users
        path: String,
        /// Action token, e.g. view
        action: String,
    },

    /// Run a navigation through the guard and print the effect
    Navigate {
        /// Resource path, e.g. /settings
        path: String,
        /// Guard action (default: view)
        #[arg(long)]
        action: Option<String>,
        /// Fallback to render instead of redirecting when denied
        #[arg(long)]
        fallback: Option<String>,
    },

    /// List catalog sections the session may view
    Sections,

    /// Print the action set held for a path as JSON
    Actions {
        /// Resource path
        path: String,
    },

    /// Print where the session lands after login
    Landing,

    /// Validate a role JSON document against the catalog
    ValidateRole {
        /// Role file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let project_root = args.project.clone().unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });
    let mut config = ConfigLoader::new()
        .with_project_root(&project_root)
        .load()
        .context("Config error")?;
    if args.debug {
        config.debug = true;
    }

    init_tracing(&config);
    debug!(path = %project_root.display(), "Project root");

    let catalog = config.catalog()?;
    let guard = AccessGuard::new(config.guard.clone());
    let session = match &args.session {
        Some(path) => Some(load_session(path)?),
        None => None,
    };

    match args.command {
        Command::Check { path, action } => {
            let allowed = match (ResourcePath::new(path.as_str()), action.parse::<Action>()) {
                (Ok(path), Ok(action)) => guard.allows(session.as_ref(), &path, action),
                _ => {
                    warn!(path = %path, action = %action, "unparseable check denied");
                    false
                }
            };
            println!("{}", if allowed { "allowed" } else { "denied" });
        }
        Command::Navigate {
            path,
            action,
            fallback,
        } => {
            let mut request = NavigationRequest::view(ResourcePath::new(path)?);
            if let Some(action) = action {
                request = request.with_action(action.parse()?);
            }
            if let Some(fallback) = fallback {
                request = request.with_fallback(fallback);
            }
            let mut nav = RecordingNavigator::new();
            let state = guard.navigate(session.as_ref(), &request, &mut nav);
            debug!(state = %state, "navigation finished");
            for effect in nav.effects() {
                println!("{effect}");
            }
        }
        Command::Sections => {
            for entry in guard.visible_sections(session.as_ref(), &catalog) {
                println!("{}\t{}", entry.path(), entry.label());
            }
        }
        Command::Actions { path } => {
            let path = ResourcePath::new(path)?;
            let set = session
                .as_ref()
                .and_then(|s| all_actions_for_path(s.actor(), s.grant(), &path));
            match set {
                Some(set) => println!("{}", serde_json::to_string(&set)?),
                None => println!("none"),
            }
        }
        Command::Landing => match &session {
            Some(s) => println!("{}", guard.landing_path(s)),
            None => println!("{}", guard.config().login_path),
        },
        Command::ValidateRole { file } => validate_role(&file, &catalog)?,
    }

    Ok(())
}

/// Terminal filter: --debug > RUST_LOG env > config `log.level`.
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &WardenConfig) {
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
    };
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

fn load_session(path: &Path) -> Result<SessionContext> {
    let response = LoginResponse::from_file(path)?;
    let established = response
        .into_session()
        .with_context(|| format!("session file '{}'", path.display()))?;
    Ok(established.session)
}

fn validate_role(file: &Path, catalog: &ResourceCatalog) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read role file '{}'", file.display()))?;
    let role: Role = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse role file '{}'", file.display()))?;
    role.validate(catalog)
        .with_context(|| format!("role '{}' is invalid", role.id()))?;
    println!("role {} ({}) is valid", role.id(), role.name());
    Ok(())
}
