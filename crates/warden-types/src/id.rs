//! Identifier types for warden.
//!
//! Identifiers are issued by the backend, not minted here: admin users
//! carry numeric primary keys and roles carry codes such as `R001`.
//! Both are kept as opaque strings.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of an authenticated [`Actor`](crate::Actor).
///
/// The backend sends user ids as JSON numbers; deserialization accepts
/// either a number or a string and normalises to the string form.
///
/// # Example
///
/// ```
/// use warden_types::ActorId;
///
/// let id: ActorId = serde_json::from_str("17").unwrap();
/// assert_eq!(id, ActorId::new("17"));
/// assert_eq!(id.to_string(), "17");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Creates an id from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

/// Identifier of a role, e.g. `R001`.
///
/// Legacy accounts carry numeric role ids (`1`, `2`), so numbers are
/// accepted on input the same way as for [`ActorId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

impl RoleId {
    /// Creates a role id from its code.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the role code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
