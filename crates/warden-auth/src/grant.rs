//! Permission grants.
//!
//! A [`PermissionGrant`] is the authorization payload issued to an actor
//! at login: resource path → [`ActionSet`]. It is immutable once built;
//! a new login issues a new grant.
//!
//! # Boundary Decoding
//!
//! Grants arrive as JSON from the backend. [`PermissionGrant::from_json`]
//! is the single place where untyped data becomes typed:
//!
//! | Input | Result |
//! |-------|--------|
//! | top level not an object, or a path value not an object | `GrantError::Malformed` |
//! | empty path key | `GrantError::EmptyPath` |
//! | action key outside the vocabulary | `GrantError::UnknownAction` |
//! | value exactly `true` | granted |
//! | any other value (`false`, `"true"`, `1`, `null`) | explicit deny |
//!
//! Unknown tokens are a data-integrity problem and are rejected; odd
//! values are absorbed as denials (fail-closed).

use crate::rows::RolePermissionRow;
use crate::ActionSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use warden_types::{Action, ErrorCode, ResourcePath, RoleId};

/// Error returned when external data cannot become a [`PermissionGrant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantError {
    /// The payload does not have the path → action → bool shape.
    #[error("malformed permission grant: {reason}")]
    Malformed {
        /// What was wrong with the shape.
        reason: String,
    },

    /// A path key was empty.
    #[error("permission grant contains an empty path")]
    EmptyPath,

    /// An action token is not part of the action vocabulary.
    #[error("unknown action '{action}' for path '{path}'")]
    UnknownAction {
        /// The path the token was listed under.
        path: String,
        /// The offending token.
        action: String,
    },

    /// A textual `is_allowed` value could not be interpreted.
    #[error("is_allowed must be 'allowed' or 'denied', got '{0}'")]
    InvalidAllowed(String),
}

impl GrantError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl ErrorCode for GrantError {
    fn code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "GRANT_MALFORMED",
            Self::EmptyPath => "GRANT_EMPTY_PATH",
            Self::UnknownAction { .. } => "GRANT_UNKNOWN_ACTION",
            Self::InvalidAllowed(_) => "GRANT_INVALID_ALLOWED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Immutable path → action → bool authorization payload.
///
/// # Example
///
/// ```
/// use warden_auth::PermissionGrant;
/// use warden_types::Action;
///
/// let grant = PermissionGrant::from_json(&serde_json::json!({
///     "/users": {"view": true, "create": true},
///     "/roles": {"view": true}
/// }))
/// .unwrap();
///
/// let users = grant.get("/users").unwrap();
/// assert!(users.is_granted(Action::Create));
/// assert!(!users.is_granted(Action::Delete));
/// assert!(grant.get("/rides").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PermissionGrant {
    paths: HashMap<ResourcePath, ActionSet>,
}

impl PermissionGrant {
    /// Creates an empty grant (nothing allowed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `actions` replacing whatever was held for `path`.
    #[must_use]
    pub fn with_path(mut self, path: ResourcePath, actions: ActionSet) -> Self {
        self.paths.insert(path, actions);
        self
    }

    /// Returns a copy with a single action set on `path`.
    #[must_use]
    pub fn with(mut self, path: ResourcePath, action: Action, allowed: bool) -> Self {
        self.paths.entry(path).or_default().set(action, allowed);
        self
    }

    /// Decodes a grant from a JSON value. See the module docs for the rules.
    ///
    /// # Errors
    ///
    /// Returns [`GrantError`] on a malformed shape, an empty path, or an
    /// unknown action token.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, GrantError> {
        let object = value
            .as_object()
            .ok_or_else(|| GrantError::malformed("expected an object keyed by path"))?;

        let mut paths = HashMap::with_capacity(object.len());
        for (raw_path, raw_actions) in object {
            let path = ResourcePath::new(raw_path.as_str()).map_err(|_| GrantError::EmptyPath)?;
            let entries = raw_actions.as_object().ok_or_else(|| {
                GrantError::malformed(format!("actions for '{raw_path}' must be an object"))
            })?;

            let mut set = ActionSet::new();
            for (token, flag) in entries {
                let action: Action = token.parse().map_err(|_| GrantError::UnknownAction {
                    path: raw_path.clone(),
                    action: token.clone(),
                })?;
                let allowed = matches!(flag, serde_json::Value::Bool(true));
                if !flag.is_boolean() {
                    tracing::warn!(
                        path = %raw_path,
                        action = %action,
                        value = %flag,
                        "non-boolean permission value treated as denied"
                    );
                }
                set.set(action, allowed);
            }
            paths.insert(path, set);
        }

        Ok(Self { paths })
    }

    /// Parses a grant from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GrantError::Malformed`] if the text is not JSON, otherwise
    /// the errors of [`from_json`](Self::from_json).
    pub fn from_json_str(text: &str) -> Result<Self, GrantError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| GrantError::malformed(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Aggregates role-permission rows into a single grant.
    ///
    /// Rows from several roles are merged. For the same `(path, action)`
    /// a granting row wins over a denying one, so an actor holding two
    /// roles gets the union of what they allow.
    ///
    /// # Errors
    ///
    /// Returns [`GrantError`] if a row names an empty path or unknown action.
    pub fn from_rows<'a, I>(rows: I) -> Result<Self, GrantError>
    where
        I: IntoIterator<Item = &'a RolePermissionRow>,
    {
        let mut paths: HashMap<ResourcePath, ActionSet> = HashMap::new();
        for row in rows {
            let (path, action) = row.key()?;
            let set = paths.entry(path).or_default();
            let allowed = set.is_granted(action) || row.is_allowed();
            set.set(action, allowed);
        }
        Ok(Self { paths })
    }

    /// Groups rows by role and builds one grant per role.
    ///
    /// # Errors
    ///
    /// Returns the first [`GrantError`] raised by any row.
    pub fn by_role(rows: &[RolePermissionRow]) -> Result<BTreeMap<RoleId, Self>, GrantError> {
        let mut grouped: BTreeMap<RoleId, Vec<&RolePermissionRow>> = BTreeMap::new();
        for row in rows {
            grouped.entry(row.role_id.clone()).or_default().push(row);
        }
        grouped
            .into_iter()
            .map(|(role, rows)| Self::from_rows(rows).map(|grant| (role, grant)))
            .collect()
    }

    /// Returns the action set for `path`, if the path is listed.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ActionSet> {
        self.paths.get(path)
    }

    /// Returns `true` if `path` is listed (even with no granted actions).
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Iterates listed paths in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourcePath, &ActionSet)> {
        self.paths.iter()
    }

    /// Returns listed paths sorted, for stable output.
    #[must_use]
    pub fn sorted_paths(&self) -> Vec<&ResourcePath> {
        let mut paths: Vec<_> = self.paths.keys().collect();
        paths.sort();
        paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<'de> Deserialize<'de> for PermissionGrant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Interprets the backend's textual `is_allowed` column.
///
/// Empty input defaults to allowed, matching the role-permission API.
///
/// # Errors
///
/// Returns [`GrantError::InvalidAllowed`] for anything unrecognised.
///
/// # Example
///
/// ```
/// use warden_auth::parse_allowed;
///
/// assert_eq!(parse_allowed("allowed"), Ok(true));
/// assert_eq!(parse_allowed("DENIED"), Ok(false));
/// assert_eq!(parse_allowed(""), Ok(true));
/// assert!(parse_allowed("maybe").is_err());
/// ```
pub fn parse_allowed(value: &str) -> Result<bool, GrantError> {
    match value.trim().to_lowercase().as_str() {
        "" | "allowed" | "true" | "1" | "yes" => Ok(true),
        "denied" | "false" | "0" | "no" => Ok(false),
        _ => Err(GrantError::InvalidAllowed(value.to_string())),
    }
}
