//! Roles: reusable grant templates.
//!
//! A [`Role`] is a [`PermissionGrant`] plus identity and a landing page.
//! Roles are authored in the console's role editor and persisted by the
//! role administration API; this module owns their shape and the checks
//! a role must pass before it is saved.

use crate::{CatalogError, PermissionGrant, ResourceCatalog};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use warden_types::{ErrorCode, ResourcePath, RoleId};

/// A role failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// The role name is empty or whitespace.
    #[error("role name must not be empty")]
    EmptyName,

    /// The default landing page is not a catalog section.
    #[error("default page '{0}' is not a known section")]
    UnknownDefaultPath(String),

    /// The permissions violate the catalog.
    #[error(transparent)]
    Permissions(#[from] CatalogError),
}

impl ErrorCode for RoleError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "ROLE_EMPTY_NAME",
            Self::UnknownDefaultPath(_) => "ROLE_UNKNOWN_DEFAULT_PATH",
            Self::Permissions(inner) => inner.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// A named permission template.
///
/// The serde shape follows the role API: `role_id`, `name`,
/// `description`, `default_page`, `is_active`, `permissions`. The API
/// sends `is_active` as `"active"` / `"deactive"`; booleans are accepted
/// too. Bookkeeping fields (`page_permission`, timestamps) are ignored.
///
/// # Example
///
/// ```
/// use warden_auth::{Role, ResourceCatalog};
///
/// let role: Role = serde_json::from_str(r#"{
///     "role_id": "R004",
///     "name": "Dispatcher",
///     "default_page": "/rides",
///     "permissions": {"/rides": {"view": true, "assign": true}}
/// }"#).unwrap();
///
/// assert!(role.is_active());
/// assert_eq!(role.default_path().as_str(), "/rides");
/// assert!(role.validate(&ResourceCatalog::dashboard()).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "role_id")]
    id: RoleId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(
        rename = "default_page",
        default = "ResourcePath::root",
        deserialize_with = "deserialize_default_page"
    )]
    default_path: ResourcePath,
    #[serde(
        default = "default_active",
        deserialize_with = "warden_types::actor::deserialize_active"
    )]
    is_active: bool,
    #[serde(default)]
    permissions: PermissionGrant,
}

fn default_active() -> bool {
    true
}

/// A null or empty `default_page` lands on the dashboard.
fn deserialize_default_page<'de, D>(deserializer: D) -> Result<ResourcePath, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(page) if !page.is_empty() => {
            ResourcePath::new(page).map_err(serde::de::Error::custom)
        }
        _ => Ok(ResourcePath::root()),
    }
}

impl Role {
    /// Creates an active role with no permissions landing on the dashboard.
    #[must_use]
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            default_path: ResourcePath::root(),
            is_active: true,
            permissions: PermissionGrant::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_default_path(mut self, path: ResourcePath) -> Self {
        self.default_path = path;
        self
    }

    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionGrant) -> Self {
        self.permissions = permissions;
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Page the role lands on after login.
    #[must_use]
    pub fn default_path(&self) -> &ResourcePath {
        &self.default_path
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn permissions(&self) -> &PermissionGrant {
        &self.permissions
    }

    /// Checks the role against `catalog` before it is saved.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] for an empty name, an unknown default page,
    /// or permissions outside the catalog.
    pub fn validate(&self, catalog: &ResourceCatalog) -> Result<(), RoleError> {
        if self.name.trim().is_empty() {
            return Err(RoleError::EmptyName);
        }
        if !catalog.contains(self.default_path.as_str()) {
            return Err(RoleError::UnknownDefaultPath(self.default_path.to_string()));
        }
        catalog.validate(&self.permissions)?;
        Ok(())
    }

    /// Returns a copy whose permissions are trimmed to `catalog`.
    ///
    /// This is what the role editor submits: every listed section carries
    /// one entry per legal action.
    #[must_use]
    pub fn sanitized(&self, catalog: &ResourceCatalog) -> Self {
        let mut role = self.clone();
        role.permissions = catalog.restrict(&self.permissions);
        role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_types::Action;

    fn catalog() -> ResourceCatalog {
        ResourceCatalog::dashboard()
    }

    fn grant(value: serde_json::Value) -> PermissionGrant {
        PermissionGrant::from_json(&value).expect("valid grant")
    }

    #[test]
    fn new_role_defaults() {
        let role = Role::new(RoleId::new("R010"), "Auditor");
        assert!(role.is_active());
        assert!(role.default_path().is_root());
        assert!(role.permissions().is_empty());
        assert_eq!(role.validate(&catalog()), Ok(()));
    }

    #[test]
    fn empty_name_rejected() {
        let role = Role::new(RoleId::new("R010"), "   ");
        assert_eq!(role.validate(&catalog()), Err(RoleError::EmptyName));
    }

    #[test]
    fn unknown_default_path_rejected() {
        let role = Role::new(RoleId::new("R010"), "Auditor")
            .with_default_path(ResourcePath::new("/reports").expect("valid"));
        let err = role.validate(&catalog()).unwrap_err();
        assert_eq!(err, RoleError::UnknownDefaultPath("/reports".into()));
        assert_eq!(err.code(), "ROLE_UNKNOWN_DEFAULT_PATH");
    }

    #[test]
    fn illegal_permission_rejected_with_catalog_code() {
        let role = Role::new(RoleId::new("R010"), "Auditor")
            .with_permissions(grant(json!({"/settings": {"delete": true}})));
        let err = role.validate(&catalog()).unwrap_err();
        assert!(matches!(err, RoleError::Permissions(_)));
        assert_eq!(err.code(), "CATALOG_ILLEGAL_ACTION");
    }

    #[test]
    fn sanitized_passes_validation() {
        let role = Role::new(RoleId::new("R010"), "Auditor").with_permissions(grant(json!({
            "/settings": {"view": true, "delete": true},
            "/payments": {"refund": true}
        })));
        let clean = role.sanitized(&catalog());
        assert_eq!(clean.validate(&catalog()), Ok(()));

        let payments = clean.permissions().get("/payments").expect("kept");
        assert!(payments.is_granted(Action::Refund));
        assert!(payments.is_listed(Action::View));
        assert!(!payments.is_granted(Action::View));
    }

    #[test]
    fn serde_uses_api_field_names() {
        let role = Role::new(RoleId::new("R001"), "Super Admin")
            .with_description("All access")
            .with_default_path(ResourcePath::new("/users").expect("valid"));
        let value = serde_json::to_value(&role).expect("serialize");
        assert_eq!(value["role_id"], "R001");
        assert_eq!(value["default_page"], "/users");
        assert_eq!(value["is_active"], true);
        assert_eq!(value["permissions"], json!({}));
    }

    #[test]
    fn decodes_role_api_record() {
        let role: Role = serde_json::from_str(
            r#"{
                "role_id": "R002",
                "name": "Admin",
                "description": null,
                "page_permission": "Dashboard",
                "default_page": "/",
                "is_active": "active",
                "created_at": "2025-01-10T08:30:00Z",
                "updated_at": "2025-01-12T14:05:00Z"
            }"#,
        )
        .expect("role API record");
        assert_eq!(role.id(), &RoleId::new("R002"));
        assert!(role.is_active());
        assert!(role.description().is_none());
        assert!(role.default_path().is_root());
        assert_eq!(role.validate(&catalog()), Ok(()));

        let retired: Role = serde_json::from_str(
            r#"{"role_id": "R007", "name": "Retired", "default_page": null, "is_active": "deactive"}"#,
        )
        .expect("deactivated record");
        assert!(!retired.is_active());
        assert!(retired.default_path().is_root());
    }

    #[test]
    fn empty_default_page_lands_on_root() {
        let role: Role = serde_json::from_str(
            r#"{"role_id": "R008", "name": "Ops", "default_page": "", "is_active": false}"#,
        )
        .expect("deserialize");
        assert!(role.default_path().is_root());
        assert!(!role.is_active());
    }

    #[test]
    fn missing_default_page_lands_on_root() {
        let role: Role =
            serde_json::from_str(r#"{"role_id": "R002", "name": "Admin"}"#).expect("deserialize");
        assert!(role.default_path().is_root());
        assert!(role.permissions().is_empty());
    }
}
