//! The closed action vocabulary.
//!
//! Every permission check names one of these tokens. The set is closed:
//! tokens arriving from outside (API payloads, config files) are parsed
//! at the boundary and anything unknown is rejected there, so the
//! resolver never sees a free-form string.

use crate::TypesError;
use serde::{Deserialize, Serialize};

/// An action that can be granted on a resource path.
///
/// The first four are the standard CRUD verbs every section supports;
/// the rest are section-specific extensions (ride assignment, driver
/// approval, customer blocking, payment refunds, complaint handling,
/// notification sending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Assign,
    Approve,
    Block,
    Refund,
    Reply,
    Resolve,
    Send,
}

impl Action {
    /// Every action, in vocabulary order.
    pub const ALL: [Action; 11] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Assign,
        Action::Approve,
        Action::Block,
        Action::Refund,
        Action::Reply,
        Action::Resolve,
        Action::Send,
    ];

    /// The four actions every CRUD section supports.
    pub const CRUD: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    /// Returns the wire token for this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Assign => "assign",
            Action::Approve => "approve",
            Action::Block => "block",
            Action::Refund => "refund",
            Action::Reply => "reply",
            Action::Resolve => "resolve",
            Action::Send => "send",
        }
    }

    /// Returns the position of this action in [`Action::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = TypesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "view" => Ok(Action::View),
            "create" => Ok(Action::Create),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            "assign" => Ok(Action::Assign),
            "approve" => Ok(Action::Approve),
            "block" => Ok(Action::Block),
            "refund" => Ok(Action::Refund),
            "reply" => Ok(Action::Reply),
            "resolve" => Ok(Action::Resolve),
            "send" => Ok(Action::Send),
            other => Err(TypesError::UnknownAction(other.to_string())),
        }
    }
}
