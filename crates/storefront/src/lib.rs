//! TechHub storefront state
//!
//! Session persistence, the shared authentication context and the per-screen
//! view models. Rendering is left to the host (the `techhub` CLI natively or a
//! browser shell on wasm32); everything here is plain state driven by async
//! calls against [`techhub_http`].

pub mod auth;
pub mod config;
pub mod format;
pub mod scope;
pub mod session;
pub mod views;

pub use auth::{AuthContext, AuthState, SessionStatus};
pub use config::{SessionFailurePolicy, StorefrontConfig};
pub use scope::{ScopeHandle, ViewScope};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use views::{Outcome, Route};

#[cfg(target_arch = "wasm32")]
pub use session::LocalStorageSessionStore;
