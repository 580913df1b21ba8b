//! Core types for the warden access-control crates.
//!
//! This crate holds the vocabulary shared by every other warden crate:
//! who is acting ([`Actor`]), where they want to act ([`ResourcePath`]),
//! and what they want to do ([`Action`]).
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  warden-types   : IDs, Actor, ResourcePath, Action  ◄── HERE │
//! ├─────────────────────────────────────────────────────────────┤
//! │  warden-auth    : PermissionGrant, resolver, catalog, Role   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  warden-runtime : session store, AccessGuard, config         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  warden-cli     : operator command-line interface            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! No permission logic lives here. An [`Actor`] is pure identity plus the
//! superadmin flag; deciding what that identity may do is the job of
//! `warden-auth`.
//!
//! # Example
//!
//! ```
//! use warden_types::{Action, Actor, ActorId, ResourcePath};
//!
//! let actor = Actor::new(ActorId::new("42"), "Dispatch Lead");
//! let path = ResourcePath::new("/rides").unwrap();
//!
//! assert!(!actor.is_superadmin());
//! assert_eq!(path.as_str(), "/rides");
//! assert_eq!("assign".parse::<Action>().unwrap(), Action::Assign);
//! ```

pub mod action;
pub mod actor;
pub mod error;
pub mod id;
pub mod path;

pub use action::Action;
pub use actor::Actor;
pub use error::{ErrorCode, TypesError};
pub use id::{ActorId, RoleId};
pub use path::ResourcePath;
