//! Permission resolver.
//!
//! Pure, synchronous functions answering "may this actor perform this
//! action on this path". Rules, in order:
//!
//! | # | Condition | Result |
//! |---|-----------|--------|
//! | 1 | actor is superadmin | allowed, whatever the grant says |
//! | 2 | no grant loaded | denied |
//! | 3 | path not listed in grant | denied |
//! | 4 | action value exactly `true` | allowed, anything else denied |
//!
//! Nothing here returns an error or panics. Every ambiguity resolves to
//! denial. Each check is a hash lookup plus a bit test, cheap enough to
//! run on every render.

use crate::{ActionSet, PermissionGrant};
use warden_types::{Action, Actor, ResourcePath};

/// Returns `true` if `actor` may perform `action` on `path`.
///
/// # Example
///
/// ```
/// use warden_auth::{is_granted, PermissionGrant};
/// use warden_types::{Action, Actor, ActorId, ResourcePath};
///
/// let actor = Actor::new(ActorId::new("9"), "Viewer");
/// let grant = PermissionGrant::from_json(&serde_json::json!({
///     "/users": {"view": true}
/// }))
/// .unwrap();
/// let users = ResourcePath::new("/users").unwrap();
/// let rides = ResourcePath::new("/rides").unwrap();
///
/// assert!(is_granted(&actor, Some(&grant), &users, Action::View));
/// assert!(!is_granted(&actor, Some(&grant), &rides, Action::View));
/// assert!(!is_granted(&actor, None, &users, Action::View));
///
/// let root = actor.clone().superadmin();
/// assert!(is_granted(&root, None, &rides, Action::Delete));
/// ```
#[must_use]
pub fn is_granted(
    actor: &Actor,
    grant: Option<&PermissionGrant>,
    path: &ResourcePath,
    action: Action,
) -> bool {
    if actor.is_superadmin() {
        return true;
    }
    grant
        .and_then(|grant| grant.get(path.as_str()))
        .is_some_and(|set| set.is_granted(action))
}

/// String-boundary variant of [`is_granted`].
///
/// Empty inputs and unknown action tokens are denied before any rule is
/// applied, including for superadmins: an unknown token names no action.
#[must_use]
pub fn is_granted_str(
    actor: &Actor,
    grant: Option<&PermissionGrant>,
    path: &str,
    action: &str,
) -> bool {
    let Ok(path) = ResourcePath::new(path) else {
        return false;
    };
    let Ok(action) = action.parse::<Action>() else {
        tracing::debug!(action = action, "unknown action token denied");
        return false;
    };
    is_granted(actor, grant, &path, action)
}

#[must_use]
pub fn can_view(actor: &Actor, grant: Option<&PermissionGrant>, path: &ResourcePath) -> bool {
    is_granted(actor, grant, path, Action::View)
}

#[must_use]
pub fn can_create(actor: &Actor, grant: Option<&PermissionGrant>, path: &ResourcePath) -> bool {
    is_granted(actor, grant, path, Action::Create)
}

#[must_use]
pub fn can_edit(actor: &Actor, grant: Option<&PermissionGrant>, path: &ResourcePath) -> bool {
    is_granted(actor, grant, path, Action::Edit)
}

#[must_use]
pub fn can_delete(actor: &Actor, grant: Option<&PermissionGrant>, path: &ResourcePath) -> bool {
    is_granted(actor, grant, path, Action::Delete)
}

/// Returns every action entry for `path`.
///
/// A superadmin gets a synthetic set granting the whole vocabulary.
/// Everyone else gets the grant's set for `path` as issued, or `None`
/// if the path is not listed or no grant is loaded.
#[must_use]
pub fn all_actions_for_path(
    actor: &Actor,
    grant: Option<&PermissionGrant>,
    path: &ResourcePath,
) -> Option<ActionSet> {
    if actor.is_superadmin() {
        return Some(ActionSet::full());
    }
    grant.and_then(|grant| grant.get(path.as_str())).copied()
}

/// Returns `true` if at least one action on `path` is granted.
#[must_use]
pub fn has_any_grant(actor: &Actor, grant: Option<&PermissionGrant>, path: &ResourcePath) -> bool {
    if actor.is_superadmin() {
        return true;
    }
    grant
        .and_then(|grant| grant.get(path.as_str()))
        .is_some_and(ActionSet::has_any)
}
