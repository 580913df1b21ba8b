//! Session and enforcement layer for warden.
//!
//! `warden-auth` answers "is this allowed". This crate holds who is
//! logged in and acts on the answer.
//!
//! # Crate Architecture
//!
//! ```text
//! warden-types  (IDs, Actor, ResourcePath, Action)
//!       ↑
//! warden-auth   (PermissionGrant, resolver, ResourceCatalog)
//!       ↑
//! warden-runtime  ◄── THIS CRATE
//! (SessionStore, LoginResponse, AccessGuard, Navigator, config)
//!       ↑
//! warden-cli
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`session`] | [`SessionContext`], [`SessionStore`], [`InMemorySessionStore`] |
//! | [`login`] | [`LoginResponse`] → [`EstablishedSession`] |
//! | [`guard`] | [`AccessGuard`] and the navigation state machine |
//! | [`navigator`] | [`Navigator`] effect sink, [`RecordingNavigator`] |
//! | [`config`] | [`WardenConfig`](config::WardenConfig), [`ConfigLoader`](config::ConfigLoader) |
//!
//! # Example
//!
//! ```
//! use warden_runtime::{
//!     AccessGuard, InMemorySessionStore, LoginResponse, NavigationRequest, NavigationState,
//!     RecordingNavigator, SessionStore,
//! };
//! use warden_runtime::config::GuardConfig;
//! use warden_types::ResourcePath;
//!
//! let response = LoginResponse::from_json_str(r#"{
//!     "message_type": "success",
//!     "user": {"id": 7, "name": "Dispatcher"},
//!     "tokens": {"access": "token"},
//!     "permissions": {"/rides": {"view": true}}
//! }"#).unwrap();
//!
//! let store = InMemorySessionStore::new();
//! store.set_session(response.into_session().unwrap().session);
//!
//! let guard = AccessGuard::new(GuardConfig::default());
//! let mut nav = RecordingNavigator::new();
//! let session = store.snapshot();
//! let rides = NavigationRequest::view(ResourcePath::new("/rides").unwrap());
//!
//! assert_eq!(guard.navigate(session.as_deref(), &rides, &mut nav), NavigationState::Granted);
//! ```

pub mod config;
pub mod guard;
pub mod login;
pub mod navigator;
pub mod session;

pub use guard::{AccessGuard, NavigationDecision, NavigationRequest, NavigationState};
pub use login::{EstablishedSession, LoginResponse, Tokens};
pub use navigator::{NavEffect, Navigator, RecordingNavigator, Redirect};
pub use session::{InMemorySessionStore, SessionContext, SessionError, SessionStore};
