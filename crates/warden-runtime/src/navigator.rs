//! Navigation effects.
//!
//! The [`AccessGuard`](crate::AccessGuard) decides; a [`Navigator`]
//! carries the decision out. A UI binds the trait to its router, tests
//! use [`RecordingNavigator`].

use warden_types::ResourcePath;

/// A redirect instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Where to go.
    pub target: ResourcePath,
    /// Path to retry after authentication.
    pub return_to: Option<ResourcePath>,
    /// Message to show on arrival.
    pub message: Option<String>,
}

impl Redirect {
    /// Redirect to the login entry point, keeping `requested` for retry.
    #[must_use]
    pub fn to_login(login_path: ResourcePath, requested: ResourcePath) -> Self {
        Self {
            target: login_path,
            return_to: Some(requested),
            message: None,
        }
    }

    /// Redirect to the landing page carrying a denial reason.
    #[must_use]
    pub fn denied(root_path: ResourcePath, message: impl Into<String>) -> Self {
        Self {
            target: root_path,
            return_to: None,
            message: Some(message.into()),
        }
    }
}

impl std::fmt::Display for Redirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "redirect {}", self.target)?;
        match (&self.return_to, &self.message) {
            (Some(return_to), _) => write!(f, " (return_to={return_to})"),
            (None, Some(message)) => write!(f, " ({message})"),
            (None, None) => Ok(()),
        }
    }
}

/// Sink for the guard's navigation effects.
pub trait Navigator {
    /// Render the requested content.
    fn render(&mut self, path: &ResourcePath);

    /// Render the call site's fallback in place of denied content.
    fn render_fallback(&mut self, path: &ResourcePath, fallback: &str);

    /// Navigate elsewhere.
    fn redirect(&mut self, redirect: Redirect);
}

/// One recorded effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    Render(ResourcePath),
    Fallback {
        path: ResourcePath,
        fallback: String,
    },
    Redirect(Redirect),
}

impl std::fmt::Display for NavEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(path) => write!(f, "render {path}"),
            Self::Fallback { path, fallback } => write!(f, "fallback {path} ({fallback})"),
            Self::Redirect(redirect) => write!(f, "{redirect}"),
        }
    }
}

/// [`Navigator`] that records every effect in order.
///
/// # Example
///
/// ```
/// use warden_runtime::{NavEffect, Navigator, RecordingNavigator};
/// use warden_types::ResourcePath;
///
/// let mut nav = RecordingNavigator::new();
/// nav.render(&ResourcePath::root());
/// assert_eq!(nav.effects(), &[NavEffect::Render(ResourcePath::root())]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    effects: Vec<NavEffect>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn effects(&self) -> &[NavEffect] {
        &self.effects
    }

    /// Returns only the redirects.
    #[must_use]
    pub fn redirects(&self) -> Vec<&Redirect> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                NavEffect::Redirect(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Returns the most recent effect.
    #[must_use]
    pub fn last(&self) -> Option<&NavEffect> {
        self.effects.last()
    }

    /// Drains the recorded effects.
    pub fn take(&mut self) -> Vec<NavEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl Navigator for RecordingNavigator {
    fn render(&mut self, path: &ResourcePath) {
        self.effects.push(NavEffect::Render(path.clone()));
    }

    fn render_fallback(&mut self, path: &ResourcePath, fallback: &str) {
        self.effects.push(NavEffect::Fallback {
            path: path.clone(),
            fallback: fallback.to_string(),
        });
    }

    fn redirect(&mut self, redirect: Redirect) {
        self.effects.push(NavEffect::Redirect(redirect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> ResourcePath {
        ResourcePath::new(p).expect("valid path")
    }

    #[test]
    fn redirect_display() {
        let login = Redirect::to_login(path("/login"), path("/settings"));
        assert_eq!(login.to_string(), "redirect /login (return_to=/settings)");

        let denied = Redirect::denied(ResourcePath::root(), "No access");
        assert_eq!(denied.to_string(), "redirect / (No access)");
    }

    #[test]
    fn records_in_order_and_drains() {
        let mut nav = RecordingNavigator::new();
        nav.render(&path("/users"));
        nav.redirect(Redirect::denied(ResourcePath::root(), "x"));
        nav.render_fallback(&path("/roles"), "read only");

        assert_eq!(nav.effects().len(), 3);
        assert_eq!(nav.redirects().len(), 1);
        assert_eq!(
            nav.last().map(ToString::to_string).as_deref(),
            Some("fallback /roles (read only)")
        );

        let drained = nav.take();
        assert_eq!(drained[0], NavEffect::Render(path("/users")));
        assert!(nav.effects().is_empty());
    }
}
