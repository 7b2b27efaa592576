//! Authentication context shared by every view
//!
//! The context is an explicit handle: views receive a clone at construction
//! instead of looking it up ambiently. State is published as immutable
//! snapshots replaced through [`AuthState::reduce`].

use crate::config::SessionFailurePolicy;
use crate::session::SessionStore;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use techhub_http::types::User;
use techhub_http::{AuthenticatedClient, ClientError, PublicClient};
use tracing::{debug, error, info, warn};

/// Authentication state snapshot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

/// Authentication context actions
#[derive(Clone, Debug)]
pub enum AuthAction {
    /// A token was stored; the profile is not fetched
    Login,
    /// A profile was fetched for the current token
    SetUser(User),
    Logout,
}

impl AuthState {
    pub fn reduce(self: Arc<Self>, action: AuthAction) -> Arc<Self> {
        match action {
            AuthAction::Login => Arc::new(Self {
                is_authenticated: true,
                user: self.user.clone(),
            }),
            // A profile that resolves after logout must not resurrect the session
            AuthAction::SetUser(_) if !self.is_authenticated => self,
            AuthAction::SetUser(user) => Arc::new(Self {
                is_authenticated: true,
                user: Some(user),
            }),
            AuthAction::Logout => Arc::new(Self::default()),
        }
    }
}

/// Result of the startup session check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token was stored
    Anonymous,
    /// The token was accepted and the profile loaded
    Restored,
    /// The profile fetch failed and the token was discarded
    Purged,
    /// The profile fetch failed but policy kept the token
    Kept,
    /// The token changed while the fetch was in flight; its result was dropped
    Superseded,
}

struct AuthInner {
    state: ArcSwap<AuthState>,
    store: Arc<dyn SessionStore>,
    client: PublicClient,
    policy: SessionFailurePolicy,
}

/// Cloneable handle to the shared authentication state
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<AuthInner>,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &self.snapshot())
            .field("policy", &self.inner.policy)
            .finish()
    }
}

impl AuthContext {
    /// Create a context; `is_authenticated` reflects whether a token is stored
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: PublicClient,
        policy: SessionFailurePolicy,
    ) -> Self {
        let state = AuthState {
            is_authenticated: store.get().is_some(),
            user: None,
        };

        Self {
            inner: Arc::new(AuthInner {
                state: ArcSwap::from_pointee(state),
                store,
                client,
                policy,
            }),
        }
    }

    fn dispatch(&self, action: AuthAction) {
        self.inner
            .state
            .rcu(|current| Arc::clone(current).reduce(action.clone()));
    }

    /// Check the stored token once by fetching the profile.
    ///
    /// Failures are never returned: depending on the policy they either purge
    /// the session or leave it in place without a profile.
    pub async fn initialize(&self) -> SessionStatus {
        let Some(token) = self.token() else {
            debug!("No stored session");
            return SessionStatus::Anonymous;
        };

        let client = self.inner.client.clone().authenticate(token.clone());
        let result = client.me().await;

        if self.token().as_deref() != Some(token.as_str()) {
            debug!("Session changed during startup check; discarding result");
            return SessionStatus::Superseded;
        }

        match result {
            Ok(user) => {
                info!(user_id = user.id, "Session restored");
                self.dispatch(AuthAction::SetUser(user));
                SessionStatus::Restored
            }
            Err(err) => {
                let purge = match self.inner.policy {
                    SessionFailurePolicy::LogoutOnAnyFailure => true,
                    SessionFailurePolicy::LogoutOnRejection => err.is_rejection(),
                };

                if purge {
                    warn!("Error fetching user, discarding session: {err}");
                    self.logout();
                    SessionStatus::Purged
                } else {
                    warn!("Error fetching user, keeping session: {err}");
                    SessionStatus::Kept
                }
            }
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> Arc<AuthState> {
        self.inner.state.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.load().is_authenticated
    }

    /// Last fetched profile
    pub fn user(&self) -> Option<User> {
        self.inner.state.load().user.clone()
    }

    /// Stored session token
    pub fn token(&self) -> Option<String> {
        self.inner.store.get()
    }

    /// Store `token` and mark the session authenticated.
    ///
    /// The profile is not fetched here; see [`AuthContext::refresh_user`].
    pub fn login(&self, token: &str) {
        if let Err(e) = self.inner.store.set(token) {
            error!("Failed to persist session token: {e}");
        }
        self.dispatch(AuthAction::Login);
    }

    /// Forget the token and the profile. No request is made.
    pub fn logout(&self) {
        if let Err(e) = self.inner.store.clear() {
            error!("Failed to clear session token: {e}");
        }
        self.dispatch(AuthAction::Logout);
    }

    /// Re-fetch the profile for the stored token
    pub async fn refresh_user(&self) -> Result<User, ClientError> {
        let client = self
            .authenticated_client()
            .ok_or_else(|| ClientError::Configuration("Not authenticated".into()))?;

        let user = client.me().await?;
        self.dispatch(AuthAction::SetUser(user.clone()));
        Ok(user)
    }

    /// Client for public endpoints
    pub fn public_client(&self) -> &PublicClient {
        &self.inner.client
    }

    /// Client carrying the stored token, or `None` without a session
    pub fn authenticated_client(&self) -> Option<AuthenticatedClient> {
        self.token()
            .map(|token| self.inner.client.clone().authenticate(token))
    }
}
