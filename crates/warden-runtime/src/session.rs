//! Session state: who is logged in and what they were granted.
//!
//! A [`SessionContext`] is an immutable snapshot taken at login. It is
//! passed explicitly to the [`AccessGuard`](crate::AccessGuard); nothing
//! in this crate reads session state from a global.
//!
//! # Lifecycle
//!
//! ```text
//!              set_session(ctx)              clear_session()
//! (no session) ───────────────► Some(Arc<ctx>) ───────────────► (no session)
//! ```
//!
//! The store is written twice per session and read on every navigation.
//! Writes replace the whole snapshot, so a reader holding an
//! `Arc<SessionContext>` keeps a consistent actor/grant pair even if a
//! logout happens meanwhile.

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use warden_auth::{is_granted, PermissionGrant};
use warden_types::{Action, Actor, ErrorCode, ResourcePath};

/// Session establishment failed.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend answered with something other than `success`.
    #[error("login rejected: {message}")]
    Rejected {
        /// Backend error text, or the unexpected `message_type`.
        message: String,
    },

    /// A success response without an access token.
    #[error("no access token received from server")]
    MissingToken,

    /// A success response without a user object.
    #[error("login response carries no user")]
    MissingUser,

    /// Failed to read a saved session file.
    #[error("failed to read session file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A saved session file is not a login response.
    #[error("failed to parse session file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ErrorCode for SessionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "SESSION_REJECTED",
            Self::MissingToken => "SESSION_MISSING_TOKEN",
            Self::MissingUser => "SESSION_MISSING_USER",
            Self::ReadFile { .. } => "SESSION_READ_FILE",
            Self::Parse { .. } => "SESSION_PARSE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Logging in again fixes any of these.
        true
    }
}

/// Immutable per-session view of the logged-in actor.
///
/// # Example
///
/// ```
/// use warden_runtime::SessionContext;
/// use warden_auth::PermissionGrant;
/// use warden_types::{Action, Actor, ActorId, ResourcePath};
///
/// let grant = PermissionGrant::from_json(&serde_json::json!({
///     "/rides": {"view": true, "assign": true}
/// }))
/// .unwrap();
/// let session = SessionContext::new(Actor::new(ActorId::new("8"), "Dispatcher"), Some(grant));
///
/// let rides = ResourcePath::new("/rides").unwrap();
/// assert!(session.is_granted(&rides, Action::Assign));
/// assert!(!session.is_granted(&rides, Action::Delete));
/// ```
#[derive(Debug, Clone)]
pub struct SessionContext {
    actor: Arc<Actor>,
    grant: Option<Arc<PermissionGrant>>,
    default_path: ResourcePath,
}

impl SessionContext {
    /// Creates a session landing on the root path.
    #[must_use]
    pub fn new(actor: Actor, grant: Option<PermissionGrant>) -> Self {
        Self {
            actor: Arc::new(actor),
            grant: grant.map(Arc::new),
            default_path: ResourcePath::root(),
        }
    }

    /// Sets the role's landing page.
    #[must_use]
    pub fn with_default_path(mut self, path: ResourcePath) -> Self {
        self.default_path = path;
        self
    }

    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Shared handle to the actor.
    #[must_use]
    pub fn actor_arc(&self) -> Arc<Actor> {
        Arc::clone(&self.actor)
    }

    /// The grant, or `None` if none was loaded (default-deny).
    #[must_use]
    pub fn grant(&self) -> Option<&PermissionGrant> {
        self.grant.as_deref()
    }

    #[must_use]
    pub fn grant_arc(&self) -> Option<Arc<PermissionGrant>> {
        self.grant.clone()
    }

    #[must_use]
    pub fn default_path(&self) -> &ResourcePath {
        &self.default_path
    }

    /// Resolver shortcut for this session's actor and grant.
    #[must_use]
    pub fn is_granted(&self, path: &ResourcePath, action: Action) -> bool {
        is_granted(&self.actor, self.grant(), path, action)
    }
}

/// Holder of the current session.
///
/// Implementations must replace the session atomically: readers observe
/// either the previous snapshot or the new one.
pub trait SessionStore: Send + Sync {
    /// Returns the current snapshot, if logged in.
    fn snapshot(&self) -> Option<Arc<SessionContext>>;

    /// Installs a new session, replacing any previous one.
    fn set_session(&self, session: SessionContext);

    /// Drops the current session.
    fn clear_session(&self);

    fn current_actor(&self) -> Option<Arc<Actor>> {
        self.snapshot().map(|s| s.actor_arc())
    }

    fn current_grant(&self) -> Option<Arc<PermissionGrant>> {
        self.snapshot().and_then(|s| s.grant_arc())
    }
}

/// Thread-safe, in-memory [`SessionStore`].
///
/// # Example
///
/// ```
/// use warden_runtime::{InMemorySessionStore, SessionContext, SessionStore};
/// use warden_types::{Actor, ActorId};
///
/// let store = InMemorySessionStore::new();
/// assert!(store.current_actor().is_none());
///
/// store.set_session(SessionContext::new(Actor::new(ActorId::new("1"), "Ops"), None));
/// assert_eq!(store.current_actor().unwrap().name(), "Ops");
/// assert!(store.current_grant().is_none());
///
/// store.clear_session();
/// assert!(store.snapshot().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    current: RwLock<Option<Arc<SessionContext>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `session`.
    #[must_use]
    pub fn with_session(session: SessionContext) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(session))),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn snapshot(&self) -> Option<Arc<SessionContext>> {
        self.current.read().clone()
    }

    fn set_session(&self, session: SessionContext) {
        tracing::info!(
            actor = %session.actor(),
            has_grant = session.grant().is_some(),
            default_path = %session.default_path(),
            "session established"
        );
        *self.current.write() = Some(Arc::new(session));
    }

    fn clear_session(&self) {
        let previous = self.current.write().take();
        if let Some(previous) = previous {
            tracing::info!(actor = %previous.actor(), "session cleared");
        }
    }
}
