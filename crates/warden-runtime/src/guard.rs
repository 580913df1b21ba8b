//! Access guard: gate navigation and affordances on the resolver.
//!
//! # Navigation State Machine
//!
//! ```text
//!                      ┌──────────────┐
//!    navigate(path) ──►│   Checking   │
//!                      └──────┬───────┘
//!          no session         │          session present
//!       ┌─────────────────────┼──────────────────────┐
//!       ▼                     │ allowed              ▼ not allowed
//! ┌────────────────┐          ▼               ┌──────────┐
//! │Unauthenticated │   ┌──────────┐           │  Denied  │
//! │ → login,       │   │ Granted  │           │ → fallback, or
//! │   return_to    │   │ → render │           │   root + message
//! └────────────────┘   └──────────┘           └──────────┘
//! ```
//!
//! Every navigation starts over from `Checking`; no decision is cached,
//! since the grant may change between sessions.
//!
//! The root path is viewable by any authenticated actor regardless of
//! the grant. It is the landing page and must never bounce.
//!
//! Affordance checks ([`AccessGuard::allows`]) skip the state machine
//! and produce no effects and no logs: they run on every render.

use crate::config::GuardConfig;
use crate::navigator::{Navigator, Redirect};
use crate::session::SessionContext;
use warden_auth::{AccessDenied, CatalogEntry, ResourceCatalog};
use warden_types::{Action, ResourcePath};

/// Where a navigation attempt ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationState {
    /// No actor in session.
    Unauthenticated,
    /// Decision pending. Initial state of every attempt.
    Checking,
    /// Actor may see the content.
    Granted,
    /// Actor is present but not permitted.
    Denied,
}

impl NavigationState {
    /// Returns `true` for the three outcome states.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Checking)
    }
}

impl std::fmt::Display for NavigationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Checking => "checking",
            Self::Granted => "granted",
            Self::Denied => "denied",
        };
        f.write_str(s)
    }
}

/// Outcome of [`AccessGuard::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationDecision {
    pub path: ResourcePath,
    pub action: Action,
    pub state: NavigationState,
}

impl NavigationDecision {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.state == NavigationState::Granted
    }
}

/// A navigation attempt as the call site describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: ResourcePath,
    /// Action to check; `view` unless the call site guards something else.
    pub action: Action,
    /// Content to render instead of redirecting when denied.
    pub fallback: Option<String>,
}

impl NavigationRequest {
    /// A plain `view` navigation without fallback.
    #[must_use]
    pub fn view(path: ResourcePath) -> Self {
        Self {
            path,
            action: Action::View,
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Navigation and affordance gate.
///
/// # Example
///
/// ```
/// use warden_runtime::{AccessGuard, NavigationState, SessionContext};
/// use warden_runtime::config::GuardConfig;
/// use warden_types::{Actor, ActorId, ResourcePath};
///
/// let guard = AccessGuard::new(GuardConfig::default());
/// let settings = ResourcePath::new("/settings").unwrap();
///
/// assert_eq!(guard.check(None, &settings).state, NavigationState::Unauthenticated);
///
/// let session = SessionContext::new(Actor::new(ActorId::new("5"), "Ops"), None);
/// assert_eq!(guard.check(Some(&session), &settings).state, NavigationState::Denied);
/// assert_eq!(
///     guard.check(Some(&session), &ResourcePath::root()).state,
///     NavigationState::Granted
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessGuard {
    config: GuardConfig,
}

impl AccessGuard {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Decides a `view` navigation to `path`.
    #[must_use]
    pub fn check(&self, session: Option<&SessionContext>, path: &ResourcePath) -> NavigationDecision {
        self.check_action(session, path, Action::View)
    }

    /// Decides a navigation guarded by `action`.
    #[must_use]
    pub fn check_action(
        &self,
        session: Option<&SessionContext>,
        path: &ResourcePath,
        action: Action,
    ) -> NavigationDecision {
        let state = self.decide(session, path, action);
        match (state, session) {
            (NavigationState::Granted, Some(s)) => {
                tracing::debug!(actor = %s.actor(), path = %path, action = %action, "navigation granted");
            }
            (NavigationState::Denied, Some(s)) => {
                tracing::warn!(actor = %s.actor(), path = %path, action = %action, "navigation denied");
            }
            _ => {
                tracing::warn!(path = %path, action = %action, "navigation without session");
            }
        }
        NavigationDecision {
            path: path.clone(),
            action,
            state,
        }
    }

    /// Decides `request` and applies the outcome to `nav`.
    ///
    /// Exactly one effect is emitted per call.
    pub fn navigate(
        &self,
        session: Option<&SessionContext>,
        request: &NavigationRequest,
        nav: &mut dyn Navigator,
    ) -> NavigationState {
        let decision = self.check_action(session, &request.path, request.action);
        match decision.state {
            NavigationState::Granted => nav.render(&request.path),
            NavigationState::Unauthenticated => nav.redirect(Redirect::to_login(
                self.config.login_path.clone(),
                request.path.clone(),
            )),
            NavigationState::Denied => match &request.fallback {
                Some(fallback) => nav.render_fallback(&request.path, fallback),
                None => nav.redirect(Redirect::denied(
                    self.config.root_path.clone(),
                    self.config.denied_message.clone(),
                )),
            },
            // decide() never yields Checking
            NavigationState::Checking => {}
        }
        decision.state
    }

    /// Affordance check: should a control for `action` on `path` render?
    #[must_use]
    pub fn allows(&self, session: Option<&SessionContext>, path: &ResourcePath, action: Action) -> bool {
        self.decide(session, path, action) == NavigationState::Granted
    }

    /// `Result` form of [`allows`](Self::allows) for handlers that use `?`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::Unauthenticated`] without a session and
    /// [`AccessDenied::Denied`] when the actor lacks the grant.
    pub fn require(
        &self,
        session: Option<&SessionContext>,
        path: &ResourcePath,
        action: Action,
    ) -> Result<(), AccessDenied> {
        match self.decide(session, path, action) {
            NavigationState::Granted => Ok(()),
            NavigationState::Unauthenticated => Err(AccessDenied::Unauthenticated {
                requested: path.to_string(),
            }),
            NavigationState::Denied | NavigationState::Checking => Err(AccessDenied::Denied {
                path: path.to_string(),
                action,
                reason: self.config.denied_message.clone(),
            }),
        }
    }

    /// Where a fresh login should land.
    ///
    /// The session's default path when the actor may view it, otherwise
    /// the root.
    #[must_use]
    pub fn landing_path(&self, session: &SessionContext) -> ResourcePath {
        let default = session.default_path();
        if self.allows(Some(session), default, Action::View) {
            default.clone()
        } else {
            tracing::debug!(
                actor = %session.actor(),
                default_path = %default,
                "default page not viewable, landing on root"
            );
            self.config.root_path.clone()
        }
    }

    /// Catalog sections the actor may view, in catalog order.
    #[must_use]
    pub fn visible_sections<'c>(
        &self,
        session: Option<&SessionContext>,
        catalog: &'c ResourceCatalog,
    ) -> Vec<&'c CatalogEntry> {
        catalog
            .entries()
            .iter()
            .filter(|entry| self.allows(session, entry.path(), Action::View))
            .collect()
    }

    fn decide(
        &self,
        session: Option<&SessionContext>,
        path: &ResourcePath,
        action: Action,
    ) -> NavigationState {
        let Some(session) = session else {
            return NavigationState::Unauthenticated;
        };
        if action == Action::View && *path == self.config.root_path {
            return NavigationState::Granted;
        }
        if session.is_granted(path, action) {
            NavigationState::Granted
        } else {
            NavigationState::Denied
        }
    }
}
