//! Per-path action sets.
//!
//! An [`ActionSet`] answers "is this action granted on this path" with a
//! single bit test. It keeps two flag words:
//!
//! ```text
//! listed  : actions that appear in the source map (true or false)
//! granted : actions whose value is exactly `true`   (granted ⊆ listed)
//! ```
//!
//! Tracking `listed` separately keeps explicit `false` entries, so a
//! set read from a role payload serializes back to the same map.

use bitflags::bitflags;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use warden_types::Action;

bitflags! {
    /// One bit per [`Action`], in vocabulary order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ActionFlags: u16 {
        const VIEW    = 1 << 0;
        const CREATE  = 1 << 1;
        const EDIT    = 1 << 2;
        const DELETE  = 1 << 3;
        const ASSIGN  = 1 << 4;
        const APPROVE = 1 << 5;
        const BLOCK   = 1 << 6;
        const REFUND  = 1 << 7;
        const REPLY   = 1 << 8;
        const RESOLVE = 1 << 9;
        const SEND    = 1 << 10;
    }
}

impl ActionFlags {
    /// The standard CRUD verbs.
    pub const CRUD: Self = Self::VIEW
        .union(Self::CREATE)
        .union(Self::EDIT)
        .union(Self::DELETE);

    /// Returns the flag for a single action.
    #[must_use]
    pub fn of(action: Action) -> Self {
        Self::from_bits_truncate(1 << action.index())
    }

    /// Returns the flags for a list of actions.
    #[must_use]
    pub fn from_actions(actions: &[Action]) -> Self {
        actions
            .iter()
            .fold(Self::empty(), |acc, action| acc | Self::of(*action))
    }

    /// Returns `true` if `action` is set.
    #[must_use]
    pub fn has(self, action: Action) -> bool {
        self.contains(Self::of(action))
    }

    /// Lists the set actions in vocabulary order.
    #[must_use]
    pub fn actions(self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| self.has(*action))
            .collect()
    }
}

/// Mapping from action to granted/denied for one resource path.
///
/// Lookups are constant time. An action that was never listed is denied,
/// exactly like one listed as `false`.
///
/// # Example
///
/// ```
/// use warden_auth::ActionSet;
/// use warden_types::Action;
///
/// let set = ActionSet::new()
///     .with(Action::View, true)
///     .with(Action::Resolve, false);
///
/// assert!(set.is_granted(Action::View));
/// assert!(!set.is_granted(Action::Resolve)); // explicit deny
/// assert!(!set.is_granted(Action::Delete));  // never listed
/// assert!(set.is_listed(Action::Resolve));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet {
    listed: ActionFlags,
    granted: ActionFlags,
}

impl ActionSet {
    /// Creates an empty set (everything denied).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a set with every action listed and granted.
    #[must_use]
    pub fn full() -> Self {
        Self {
            listed: ActionFlags::all(),
            granted: ActionFlags::all(),
        }
    }

    /// Returns a set granting exactly `actions`.
    #[must_use]
    pub fn granting(actions: &[Action]) -> Self {
        let flags = ActionFlags::from_actions(actions);
        Self {
            listed: flags,
            granted: flags,
        }
    }

    /// Returns a copy with `action` set to `allowed`.
    #[must_use]
    pub fn with(mut self, action: Action, allowed: bool) -> Self {
        self.set(action, allowed);
        self
    }

    /// Sets `action` to `allowed`, listing it if it was absent.
    pub fn set(&mut self, action: Action, allowed: bool) {
        let flag = ActionFlags::of(action);
        self.listed |= flag;
        self.granted.set(flag, allowed);
    }

    /// Returns `true` only if `action` is listed with value `true`.
    #[must_use]
    pub fn is_granted(&self, action: Action) -> bool {
        self.granted.has(action)
    }

    /// Returns `true` if `action` appears in the set, granted or not.
    #[must_use]
    pub fn is_listed(&self, action: Action) -> bool {
        self.listed.has(action)
    }

    /// Returns `true` if at least one action is granted.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.granted.is_empty()
    }

    /// Returns the granted actions in vocabulary order.
    #[must_use]
    pub fn granted(&self) -> Vec<Action> {
        self.granted.actions()
    }

    #[must_use]
    pub fn granted_flags(&self) -> ActionFlags {
        self.granted
    }

    #[must_use]
    pub fn listed_flags(&self) -> ActionFlags {
        self.listed
    }

    /// Returns the number of listed actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listed.bits().count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listed.is_empty()
    }

    /// Iterates listed actions with their values, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, bool)> + '_ {
        Action::ALL
            .into_iter()
            .filter(|action| self.listed.has(*action))
            .map(|action| (action, self.granted.has(action)))
    }

    /// Keeps only actions in `legal`, listing every legal action.
    ///
    /// Legal actions missing from the set become explicit denies. This is
    /// the shape the role editor submits: one checkbox per legal action.
    #[must_use]
    pub fn restrict_to(&self, legal: ActionFlags) -> Self {
        Self {
            listed: legal,
            granted: self.granted & legal,
        }
    }
}

impl Serialize for ActionSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (action, allowed) in self.iter() {
            map.serialize_entry(action.as_str(), &allowed)?;
        }
        map.end()
    }
}
