//! Admin login response.
//!
//! The backend's `admin/login/` endpoint answers with:
//!
//! ```json
//! {
//!   "message_type": "success",
//!   "user": {"id": 1, "name": "Admin User", "role_id": "R001", "is_superadmin": true, "is_active": true},
//!   "tokens": {"access": "eyJ...", "refresh": "eyJ..."},
//!   "permissions": {"/users": {"view": true}}
//! }
//! ```
//!
//! [`LoginResponse::into_session`] turns that into a [`SessionContext`].
//! Tokens are carried through untouched; refreshing them is the HTTP
//! client's business.

use crate::session::{SessionContext, SessionError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use warden_auth::PermissionGrant;
use warden_types::{Actor, ResourcePath};

/// Opaque credential pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("access", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Body of the admin login endpoint, success or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Tokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Actor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<serde_json::Value>,
    /// The role's landing page, when the backend sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_page: Option<ResourcePath>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub session: SessionContext,
    pub tokens: Tokens,
}

impl LoginResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `text` is not a login response.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads a saved response from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ReadFile`] or [`SessionError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message_type == "success"
    }

    /// Validates the response and builds the session.
    ///
    /// A permissions payload that does not decode is dropped with a
    /// warning: the session is still established, but with no grant, so
    /// every non-root check is denied.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Rejected`] unless `message_type` is `success`
    /// - [`SessionError::MissingToken`] if the access token is absent or empty
    /// - [`SessionError::MissingUser`] if there is no user object
    pub fn into_session(self) -> Result<EstablishedSession, SessionError> {
        if !self.is_success() {
            let message = self
                .error
                .unwrap_or_else(|| format!("unexpected message_type '{}'", self.message_type));
            return Err(SessionError::Rejected { message });
        }

        let tokens = self
            .tokens
            .filter(|t| !t.access.is_empty())
            .ok_or(SessionError::MissingToken)?;
        let actor = self.user.ok_or(SessionError::MissingUser)?;
        let grant = self.permissions.and_then(|value| decode_grant(&actor, &value));
        let mut session = SessionContext::new(actor, grant);
        if let Some(page) = self.default_page {
            session = session.with_default_path(page);
        }

        Ok(EstablishedSession { session, tokens })
    }
}

fn decode_grant(actor: &Actor, value: &serde_json::Value) -> Option<PermissionGrant> {
    if value.is_null() {
        return None;
    }
    match PermissionGrant::from_json(value) {
        Ok(grant) => Some(grant),
        Err(e) => {
            tracing::warn!(
                actor = %actor,
                error = %e,
                "discarding undecodable permissions; session has no grant"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_types::Action;

    fn success(permissions: serde_json::Value) -> LoginResponse {
        serde_json::from_value(json!({
            "message_type": "success",
            "user": {"id": 3, "name": "Dana", "role_id": "R003", "is_superadmin": false, "is_active": true},
            "tokens": {"access": "a.b.c", "refresh": "d.e.f"},
            "permissions": permissions
        }))
        .expect("login response")
    }

    #[test]
    fn success_builds_session() {
        let established = success(json!({"/users": {"view": true}}))
            .into_session()
            .expect("session");
        let users = ResourcePath::new("/users").expect("valid");

        assert_eq!(established.tokens.access, "a.b.c");
        assert_eq!(established.session.actor().name(), "Dana");
        assert!(established.session.is_granted(&users, Action::View));
        assert!(established.session.default_path().is_root());
    }

    #[test]
    fn default_page_carried_into_session() {
        let mut response = success(json!({"/rides": {"view": true}}));
        response.default_page = Some(ResourcePath::new("/rides").expect("valid"));
        let established = response.into_session().expect("session");
        assert_eq!(established.session.default_path().as_str(), "/rides");
    }

    #[test]
    fn error_message_type_rejected() {
        let response: LoginResponse = serde_json::from_value(json!({
            "message_type": "error",
            "error": "Please enter valid email or password"
        }))
        .expect("error response");
        let err = response.into_session().unwrap_err();
        assert!(matches!(err, SessionError::Rejected { .. }));
        assert!(err.to_string().contains("valid email"));
    }

    #[test]
    fn empty_access_token_rejected() {
        let mut response = success(json!({}));
        response.tokens = Some(Tokens {
            access: String::new(),
            refresh: None,
        });
        assert!(matches!(
            response.into_session(),
            Err(SessionError::MissingToken)
        ));
    }

    #[test]
    fn missing_user_rejected() {
        let mut response = success(json!({}));
        response.user = None;
        assert!(matches!(
            response.into_session(),
            Err(SessionError::MissingUser)
        ));
    }

    #[test]
    fn undecodable_permissions_leave_no_grant() {
        let established = success(json!({"/users": {"teleport": true}}))
            .into_session()
            .expect("session still established");
        assert!(established.session.grant().is_none());
    }

    #[test]
    fn null_permissions_leave_no_grant() {
        let established = success(serde_json::Value::Null)
            .into_session()
            .expect("session");
        assert!(established.session.grant().is_none());
    }

    #[test]
    fn tokens_debug_is_redacted() {
        let tokens = Tokens {
            access: "secret".into(),
            refresh: Some("secret2".into()),
        };
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("secret"), "got: {rendered}");
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").expect("write");

        let err = LoginResponse::from_file(&path).unwrap_err();
        assert!(matches!(err, SessionError::Parse { .. }));
        assert!(err.to_string().contains("session.json"));

        let missing = LoginResponse::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, SessionError::ReadFile { .. }));
    }
}
