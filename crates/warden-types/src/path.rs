//! Resource paths.

use crate::TypesError;
use serde::{Deserialize, Serialize};

/// A protected area of the console, keyed by its route (`/users`, `/rides`).
///
/// Paths are compared exactly; there is no prefix or wildcard matching.
/// The root path `/` is the dashboard landing page.
///
/// # Example
///
/// ```
/// use warden_types::ResourcePath;
///
/// let root = ResourcePath::root();
/// assert!(root.is_root());
///
/// assert!(ResourcePath::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourcePath(String);

impl ResourcePath {
    /// The dashboard route.
    pub const ROOT: &'static str = "/";

    /// Creates a path.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::EmptyPath`] if `path` is empty.
    pub fn new(path: impl Into<String>) -> Result<Self, TypesError> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypesError::EmptyPath);
        }
        Ok(Self(path))
    }

    /// Returns the root (dashboard) path.
    #[must_use]
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourcePath {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ResourcePath {
    type Error = TypesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.0
    }
}

impl std::borrow::Borrow<str> for ResourcePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
