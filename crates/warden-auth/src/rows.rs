//! Role-permission rows as stored by the role administration API.
//!
//! The backend persists one row per `(role_id, page_path, permission_type)`
//! with an `is_allowed` column that older clients send as a string
//! (`"allowed"` / `"denied"`) and newer ones as a boolean. Rows are folded
//! into grants by [`PermissionGrant::from_rows`](crate::PermissionGrant::from_rows).

use crate::grant::{parse_allowed, GrantError};
use serde::{Deserialize, Deserializer, Serialize};
use warden_types::{Action, ResourcePath, RoleId};

/// A single stored permission decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionRow {
    /// Owning role.
    pub role_id: RoleId,
    /// Denormalised role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Route the permission applies to.
    pub page_path: String,
    /// Action token.
    pub permission_type: String,
    /// Whether the action is allowed.
    #[serde(default = "default_allowed", deserialize_with = "deserialize_allowed")]
    pub is_allowed: bool,
}

fn default_allowed() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAllowed {
    Flag(bool),
    Text(String),
}

fn deserialize_allowed<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAllowed>::deserialize(deserializer)? {
        None => Ok(true),
        Some(RawAllowed::Flag(flag)) => Ok(flag),
        Some(RawAllowed::Text(text)) => parse_allowed(&text).map_err(serde::de::Error::custom),
    }
}

impl RolePermissionRow {
    /// Creates a row.
    #[must_use]
    pub fn new(
        role_id: RoleId,
        page_path: impl Into<String>,
        permission_type: impl Into<String>,
        is_allowed: bool,
    ) -> Self {
        Self {
            role_id,
            name: None,
            page_path: page_path.into(),
            permission_type: permission_type.into(),
            is_allowed,
        }
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.is_allowed
    }

    /// Returns the typed `(path, action)` key of this row.
    ///
    /// # Errors
    ///
    /// Returns [`GrantError::EmptyPath`] or [`GrantError::UnknownAction`].
    pub fn key(&self) -> Result<(ResourcePath, Action), GrantError> {
        let path = ResourcePath::new(self.page_path.as_str()).map_err(|_| GrantError::EmptyPath)?;
        let action: Action = self
            .permission_type
            .parse()
            .map_err(|_| GrantError::UnknownAction {
                path: self.page_path.clone(),
                action: self.permission_type.clone(),
            })?;
        Ok((path, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermissionGrant;

    fn row(role: &str, path: &str, action: &str, allowed: bool) -> RolePermissionRow {
        RolePermissionRow::new(RoleId::new(role), path, action, allowed)
    }

    #[test]
    fn is_allowed_accepts_text_and_bool() {
        let text: RolePermissionRow = serde_json::from_str(
            r#"{"role_id": "R001", "page_path": "/users", "permission_type": "view", "is_allowed": "denied"}"#,
        )
        .expect("text form");
        assert!(!text.is_allowed());

        let flag: RolePermissionRow = serde_json::from_str(
            r#"{"role_id": "R001", "page_path": "/users", "permission_type": "view", "is_allowed": true}"#,
        )
        .expect("bool form");
        assert!(flag.is_allowed());

        let missing: RolePermissionRow = serde_json::from_str(
            r#"{"role_id": "R001", "page_path": "/users", "permission_type": "view"}"#,
        )
        .expect("missing defaults to allowed");
        assert!(missing.is_allowed());
    }

    #[test]
    fn invalid_text_rejected() {
        let result = serde_json::from_str::<RolePermissionRow>(
            r#"{"role_id": "R001", "page_path": "/users", "permission_type": "view", "is_allowed": "perhaps"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn key_rejects_unknown_token() {
        let err = row("R001", "/users", "impersonate", true).key().unwrap_err();
        assert!(matches!(err, GrantError::UnknownAction { .. }));
        assert_eq!(row("R001", "", "view", true).key(), Err(GrantError::EmptyPath));
    }

    #[test]
    fn grant_from_two_roles_takes_union() {
        let rows = vec![
            row("R001", "/users", "view", true),
            row("R001", "/users", "delete", false),
            row("R002", "/users", "delete", true),
            row("R002", "/users", "view", false),
        ];
        let grant = PermissionGrant::from_rows(&rows).expect("fold");
        let users = grant.get("/users").expect("listed");
        assert!(users.is_granted(Action::View));
        assert!(users.is_granted(Action::Delete));
    }

    #[test]
    fn denied_rows_still_list_the_path() {
        let rows = vec![row("R003", "/payments", "refund", false)];
        let grant = PermissionGrant::from_rows(&rows).expect("fold");
        let payments = grant.get("/payments").expect("listed");
        assert!(!payments.has_any());
        assert!(payments.is_listed(Action::Refund));
    }

    #[test]
    fn by_role_splits_grants() {
        let rows = vec![
            row("R001", "/rides", "assign", true),
            row("R002", "/rides", "view", true),
        ];
        let grants = PermissionGrant::by_role(&rows).expect("group");
        assert_eq!(grants.len(), 2);

        let r1 = &grants[&RoleId::new("R001")];
        assert!(r1.get("/rides").expect("listed").is_granted(Action::Assign));
        assert!(!r1.get("/rides").expect("listed").is_granted(Action::View));
    }
}
