//! Actor (authenticated identity) types.
//!
//! An [`Actor`] is created by the login flow and held for the duration
//! of a session. It carries identity and the superadmin flag only;
//! what the actor may do is decided from its permission grant.

use crate::{ActorId, RoleId};
use serde::{Deserialize, Deserializer, Serialize};

/// An authenticated identity evaluated against permissions.
///
/// The serde shape matches the `user` object of the admin login
/// response (`id`, `name`, `username`, `email`, `role_id`, `role_name`,
/// `is_superadmin`, `is_active`).
///
/// # Why No Default?
///
/// **DO NOT implement `Default` for Actor.**
///
/// An actor without a backend-issued id is not an identity. Always
/// construct with [`Actor::new`] or deserialize a login payload.
///
/// # Example
///
/// ```
/// use warden_types::{Actor, ActorId, RoleId};
///
/// let admin = Actor::new(ActorId::new("1"), "Root").superadmin();
/// assert!(admin.is_superadmin());
///
/// let agent = Actor::new(ActorId::new("2"), "Support Agent")
///     .with_role(RoleId::new("R003"), "Support");
/// assert_eq!(agent.role_name(), Some("Support"));
/// assert!(agent.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role_id: Option<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role_name: Option<String>,
    #[serde(default)]
    is_superadmin: bool,
    #[serde(default = "default_active", deserialize_with = "deserialize_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActive {
    Flag(bool),
    Status(String),
}

/// Decodes an `is_active` field sent as a bool or as a status string.
///
/// The accounts and roles tables store `"active"` / `"inactive"` /
/// `"deactive"`; newer payloads send a bool. Only `"active"` (any case)
/// is active. `null` counts as active.
///
/// # Errors
///
/// Returns the deserializer's error for any other JSON shape.
pub fn deserialize_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawActive>::deserialize(deserializer)? {
        None => Ok(true),
        Some(RawActive::Flag(flag)) => Ok(flag),
        Some(RawActive::Status(status)) => Ok(status.eq_ignore_ascii_case("active")),
    }
}

impl Actor {
    /// Creates an active, non-superadmin actor.
    #[must_use]
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            username: None,
            email: None,
            role_id: None,
            role_name: None,
            is_superadmin: false,
            is_active: true,
        }
    }

    /// Marks the actor as superadmin.
    #[must_use]
    pub fn superadmin(mut self) -> Self {
        self.is_superadmin = true;
        self
    }

    /// Marks the actor as inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Attaches the role the actor logged in with.
    #[must_use]
    pub fn with_role(mut self, id: RoleId, name: impl Into<String>) -> Self {
        self.role_id = Some(id);
        self.role_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn role_id(&self) -> Option<&RoleId> {
        self.role_id.as_ref()
    }

    #[must_use]
    pub fn role_name(&self) -> Option<&str> {
        self.role_name.as_deref()
    }

    /// Returns `true` if every permission check is bypassed for this actor.
    #[must_use]
    pub fn is_superadmin(&self) -> bool {
        self.is_superadmin
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_superadmin {
            write!(f, "actor:{}@superadmin", self.id)
        } else {
            write!(f, "actor:{}", self.id)
        }
    }
}
