//! Resource catalog.
//!
//! The catalog is the static list of protected sections of the console
//! and, per section, which actions can legally be granted there. It is
//! configuration, not runtime state.
//!
//! The resolver does not consult the catalog: an action outside the
//! catalog is simply never granted in a valid grant. The catalog is used
//! where grants are authored (role editing) to reject or strip entries
//! that should never exist.
//!
//! # Built-in Catalog
//!
//! | Path | Label | Actions |
//! |------|-------|---------|
//! | `/` | Dashboard | view, edit |
//! | `/users` | User Management | CRUD |
//! | `/roles` | Roles & Permissions | CRUD |
//! | `/rides` | Ride Management | CRUD + assign |
//! | `/drivers` | Driver Management | CRUD + approve |
//! | `/customers` | Customer Management | CRUD + block |
//! | `/zones` | Zone Management | CRUD |
//! | `/payments` | Payments & Transactions | CRUD + refund |
//! | `/vehicles` | Vehicles Management | CRUD |
//! | `/complaints` | Complaints & Support | CRUD + reply, resolve |
//! | `/promotions` | Promotions & Coupons | CRUD |
//! | `/notifications` | Notifications | CRUD + send |
//! | `/settings` | Admin Settings | view, edit |

use crate::action_set::ActionFlags;
use crate::PermissionGrant;
use std::collections::HashMap;
use thiserror::Error;
use warden_types::{Action, ErrorCode, ResourcePath, TypesError};

/// Grant or catalog content that violates the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A grant lists a path the catalog does not know.
    #[error("unknown resource path '{0}'")]
    UnknownPath(String),

    /// A grant lists an action the path does not support.
    #[error("action '{action}' is not legal for '{path}'")]
    IllegalAction {
        /// The path.
        path: String,
        /// The action listed under it.
        action: Action,
    },

    /// The same path appears twice in a catalog definition.
    #[error("duplicate catalog path '{0}'")]
    DuplicatePath(String),

    /// A catalog entry has no legal actions.
    #[error("catalog path '{0}' has no actions")]
    NoActions(String),

    /// A catalog entry has an unusable path.
    #[error("invalid catalog path: {0}")]
    InvalidPath(#[from] TypesError),
}

impl ErrorCode for CatalogError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownPath(_) => "CATALOG_UNKNOWN_PATH",
            Self::IllegalAction { .. } => "CATALOG_ILLEGAL_ACTION",
            Self::DuplicatePath(_) => "CATALOG_DUPLICATE_PATH",
            Self::NoActions(_) => "CATALOG_NO_ACTIONS",
            Self::InvalidPath(_) => "CATALOG_INVALID_PATH",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// One protected section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    path: ResourcePath,
    label: String,
    actions: ActionFlags,
}

impl CatalogEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(path: ResourcePath, label: impl Into<String>, actions: &[Action]) -> Self {
        Self {
            path,
            label: label.into(),
            actions: ActionFlags::from_actions(actions),
        }
    }

    #[must_use]
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// Human-readable section name (sidebar label).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Legal actions in vocabulary order.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        self.actions.actions()
    }

    #[must_use]
    pub fn flags(&self) -> ActionFlags {
        self.actions
    }
}

/// Ordered set of protected sections with their legal actions.
///
/// # Example
///
/// ```
/// use warden_auth::ResourceCatalog;
/// use warden_types::Action;
///
/// let catalog = ResourceCatalog::dashboard();
/// let rides = catalog.legal_actions("/rides").unwrap();
/// assert!(rides.contains(&Action::Assign));
/// assert!(!rides.contains(&Action::Refund));
/// assert!(catalog.legal_actions("/nowhere").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<ResourcePath, usize>,
}

impl ResourceCatalog {
    /// Builds a catalog from entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicatePath`] or [`CatalogError::NoActions`].
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if entry.actions.is_empty() {
                return Err(CatalogError::NoActions(entry.path.to_string()));
            }
            if index.insert(entry.path.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePath(entry.path.to_string()));
            }
        }
        Ok(Self { entries, index })
    }

    /// The ride-hailing operations console catalog.
    ///
    /// Built through [`from_entries`](Self::from_entries) like any
    /// configured catalog. Should that ever fail, the catalog is empty
    /// and no section is offered.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::try_dashboard().unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in catalog rejected, using an empty catalog");
            Self {
                entries: Vec::new(),
                index: HashMap::new(),
            }
        })
    }

    fn try_dashboard() -> Result<Self, CatalogError> {
        let crud_plus = |extra: &[Action]| -> Vec<Action> {
            let mut actions = Action::CRUD.to_vec();
            actions.extend_from_slice(extra);
            actions
        };
        let view_edit = vec![Action::View, Action::Edit];
        let sections = [
            ("/", "Dashboard", view_edit.clone()),
            ("/users", "User Management", crud_plus(&[])),
            ("/roles", "Roles & Permissions", crud_plus(&[])),
            ("/rides", "Ride Management", crud_plus(&[Action::Assign])),
            ("/drivers", "Driver Management", crud_plus(&[Action::Approve])),
            ("/customers", "Customer Management", crud_plus(&[Action::Block])),
            ("/zones", "Zone Management", crud_plus(&[])),
            ("/payments", "Payments & Transactions", crud_plus(&[Action::Refund])),
            ("/vehicles", "Vehicles Management", crud_plus(&[])),
            (
                "/complaints",
                "Complaints & Support",
                crud_plus(&[Action::Reply, Action::Resolve]),
            ),
            ("/promotions", "Promotions & Coupons", crud_plus(&[])),
            ("/notifications", "Notifications", crud_plus(&[Action::Send])),
            ("/settings", "Admin Settings", view_edit),
        ];

        let entries = sections
            .into_iter()
            .map(|(path, label, actions)| -> Result<CatalogEntry, CatalogError> {
                Ok(CatalogEntry::new(ResourcePath::new(path)?, label, &actions))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&CatalogEntry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Legal action tokens for `path`, in vocabulary order.
    #[must_use]
    pub fn legal_actions(&self, path: &str) -> Option<Vec<Action>> {
        self.get(path).map(CatalogEntry::actions)
    }

    /// Checks that every listed path and action in `grant` is legal.
    ///
    /// Explicit denies are checked too: listing an illegal action at all
    /// is a data-integrity violation.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in sorted path order.
    pub fn validate(&self, grant: &PermissionGrant) -> Result<(), CatalogError> {
        for path in grant.sorted_paths() {
            let entry = self
                .get(path.as_str())
                .ok_or_else(|| CatalogError::UnknownPath(path.to_string()))?;
            let Some(set) = grant.get(path.as_str()) else {
                continue;
            };
            let illegal = set.listed_flags().difference(entry.actions);
            if let Some(action) = illegal.actions().first() {
                return Err(CatalogError::IllegalAction {
                    path: path.to_string(),
                    action: *action,
                });
            }
        }
        Ok(())
    }

    /// Returns `grant` trimmed to the catalog.
    ///
    /// Unknown paths are dropped. Each remaining path lists its full legal
    /// vocabulary, granted where the input granted it and explicitly
    /// denied elsewhere.
    #[must_use]
    pub fn restrict(&self, grant: &PermissionGrant) -> PermissionGrant {
        grant
            .iter()
            .filter_map(|(path, set)| {
                self.get(path.as_str())
                    .map(|entry| (path.clone(), set.restrict_to(entry.actions)))
            })
            .fold(PermissionGrant::new(), |acc, (path, set)| {
                acc.with_path(path, set)
            })
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grant(value: serde_json::Value) -> PermissionGrant {
        PermissionGrant::from_json(&value).expect("valid grant")
    }

    #[test]
    fn builtin_catalog_passes_entry_checks() {
        let catalog = ResourceCatalog::try_dashboard().expect("built-in catalog is valid");
        assert_eq!(catalog, ResourceCatalog::dashboard());
        for entry in catalog.entries() {
            assert!(!entry.actions().is_empty(), "{} has no actions", entry.path());
        }
    }

    #[test]
    fn dashboard_catalog_shape() {
        let catalog = ResourceCatalog::dashboard();
        assert_eq!(catalog.entries().len(), 13);
        assert_eq!(catalog.entries()[0].path().as_str(), "/");
        assert_eq!(catalog.entries()[0].label(), "Dashboard");

        assert_eq!(
            catalog.legal_actions("/"),
            Some(vec![Action::View, Action::Edit])
        );
        assert_eq!(
            catalog.legal_actions("/settings"),
            Some(vec![Action::View, Action::Edit])
        );
        assert_eq!(
            catalog.legal_actions("/complaints"),
            Some(vec![
                Action::View,
                Action::Create,
                Action::Edit,
                Action::Delete,
                Action::Reply,
                Action::Resolve
            ])
        );
        assert_eq!(
            catalog.legal_actions("/users"),
            Some(Action::CRUD.to_vec())
        );
    }

    #[test]
    fn validate_accepts_legal_grant() {
        let catalog = ResourceCatalog::dashboard();
        let g = grant(json!({
            "/rides": {"view": true, "assign": true},
            "/complaints": {"reply": true, "resolve": false}
        }));
        assert_eq!(catalog.validate(&g), Ok(()));
    }

    #[test]
    fn validate_rejects_illegal_action() {
        let catalog = ResourceCatalog::dashboard();
        let g = grant(json!({"/settings": {"create": true}}));
        assert_eq!(
            catalog.validate(&g),
            Err(CatalogError::IllegalAction {
                path: "/settings".into(),
                action: Action::Create
            })
        );
    }

    #[test]
    fn validate_rejects_explicitly_denied_illegal_action() {
        let catalog = ResourceCatalog::dashboard();
        let g = grant(json!({"/users": {"refund": false}}));
        assert!(matches!(
            catalog.validate(&g),
            Err(CatalogError::IllegalAction { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_path() {
        let catalog = ResourceCatalog::dashboard();
        let g = grant(json!({"/reports": {"view": true}}));
        assert_eq!(
            catalog.validate(&g),
            Err(CatalogError::UnknownPath("/reports".into()))
        );
    }

    #[test]
    fn restrict_normalises_to_legal_vocabulary() {
        let catalog = ResourceCatalog::dashboard();
        let g = grant(json!({
            "/settings": {"view": true, "create": true},
            "/reports": {"view": true}
        }));
        let restricted = catalog.restrict(&g);

        assert!(!restricted.contains_path("/reports"));
        let settings = restricted.get("/settings").expect("kept");
        assert!(settings.is_granted(Action::View));
        assert!(!settings.is_listed(Action::Create));
        assert!(settings.is_listed(Action::Edit));
        assert!(!settings.is_granted(Action::Edit));
        assert_eq!(catalog.validate(&restricted), Ok(()));
    }

    #[test]
    fn from_entries_rejects_duplicates_and_empty() {
        let users = ResourcePath::new("/users").expect("valid");
        let dup = ResourceCatalog::from_entries(vec![
            CatalogEntry::new(users.clone(), "Users", &[Action::View]),
            CatalogEntry::new(users.clone(), "Users again", &[Action::Edit]),
        ]);
        assert_eq!(dup, Err(CatalogError::DuplicatePath("/users".into())));

        let empty = ResourceCatalog::from_entries(vec![CatalogEntry::new(users, "Users", &[])]);
        assert_eq!(empty, Err(CatalogError::NoActions("/users".into())));
    }

    #[test]
    fn from_entries_keeps_order() {
        let catalog = ResourceCatalog::from_entries(vec![
            CatalogEntry::new(
                ResourcePath::new("/b").expect("valid"),
                "B",
                &[Action::View],
            ),
            CatalogEntry::new(
                ResourcePath::new("/a").expect("valid"),
                "A",
                &[Action::View],
            ),
        ])
        .expect("valid catalog");
        let labels: Vec<&str> = catalog.entries().iter().map(CatalogEntry::label).collect();
        assert_eq!(labels, vec!["B", "A"]);
        assert!(catalog.contains("/a"));
    }
}
