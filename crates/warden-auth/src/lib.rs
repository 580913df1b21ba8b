//! Permission primitives for warden.
//!
//! This crate turns the permission payload issued at login into typed
//! data and answers allow/deny questions against it.
//!
//! # Decision Model
//!
//! ```text
//! Allowed = Actor.is_superadmin  ∨  Grant[path][action] == true
//! ```
//!
//! | Piece | Type | Controls |
//! |-------|------|----------|
//! | [`ActionSet`] | Bitflags pair | Which actions are listed and which granted on one path |
//! | [`PermissionGrant`] | Map | Path → [`ActionSet`] for one actor |
//! | [`is_granted`] and friends | Functions | The decision itself |
//! | [`ResourceCatalog`] | Static table | Which actions are legal where |
//! | [`Role`] | Struct | A named, reusable grant |
//!
//! # Crate Architecture
//!
//! ```text
//! warden-types  (IDs, Actor, ResourcePath, Action)
//!       ↑
//! warden-auth  ◄── THIS CRATE
//! (ActionSet, PermissionGrant, resolver, ResourceCatalog, Role)
//!       ↑
//! warden-runtime (SessionStore, AccessGuard, config)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: missing grant, missing path, or any value other
//!   than `true` means denied
//! - **Superadmin bypass**: the flag on the actor short-circuits every check
//! - **Pure resolver**: no I/O, no globals; the caller passes the actor and grant

pub mod action_set;
pub mod catalog;
pub mod error;
pub mod grant;
pub mod resolver;
pub mod role;
pub mod rows;

pub use action_set::{ActionFlags, ActionSet};
pub use catalog::{CatalogEntry, CatalogError, ResourceCatalog};
pub use error::AccessDenied;
pub use grant::{parse_allowed, GrantError, PermissionGrant};
pub use resolver::{
    all_actions_for_path, can_create, can_delete, can_edit, can_view, has_any_grant, is_granted,
    is_granted_str,
};
pub use role::{Role, RoleError};
pub use rows::RolePermissionRow;

// Re-export the shared vocabulary for convenience
pub use warden_types::{Action, Actor, ResourcePath};
