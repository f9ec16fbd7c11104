//! Session context holding the credential pair.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::models::User;
use crate::router::AuthState;

use super::storage::{CredentialStore, MemoryStore};
use super::tokens::{AccessToken, RefreshToken};

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// The session credential pair, shared by everything that talks to the backend.
///
/// A `SessionContext` is an explicit handle passed into the
/// [`Gateway`](crate::Gateway) and the [`Router`](crate::Router) rather than
/// ambient global state. Clones share the same tokens. Every token change is
/// mirrored into the backing [`CredentialStore`] so the session survives
/// restarts.
///
/// "Authenticated" is not stored anywhere; it is recomputed from whether an
/// access token is held. The signed-in user's profile is cached here after
/// a successful `GET /api/auth/me` but never persisted.
///
/// Locks are never held across an await point.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
    user: Option<User>,
}

impl SessionContext {
    /// Restore a session from the tokens held in `store`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(store: Arc<dyn CredentialStore>) -> Result<Self, Error> {
        let access_token = store.get(ACCESS_TOKEN_KEY)?.map(AccessToken::new);
        let refresh_token = store.get(REFRESH_TOKEN_KEY)?.map(RefreshToken::new);

        debug!(
            has_access = access_token.is_some(),
            has_refresh = refresh_token.is_some(),
            "Restored session from credential store"
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                store,
                state: RwLock::new(SessionState {
                    access_token,
                    refresh_token,
                    user: None,
                }),
            }),
        })
    }

    /// An empty session backed by a [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Arc::new(MemoryStore::new()),
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.read().access_token.clone()
    }

    /// The current refresh token, if any.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.read().refresh_token.clone()
    }

    /// True iff an access token is held.
    pub fn is_authenticated(&self) -> bool {
        self.read().access_token.is_some()
    }

    /// The cached profile of the signed-in user.
    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    /// True if the cached user has the admin role.
    pub fn is_admin(&self) -> bool {
        self.read().user.as_ref().is_some_and(User::is_admin)
    }

    /// Snapshot for the navigation guard.
    pub fn auth_state(&self) -> AuthState {
        let state = self.read();
        AuthState {
            authenticated: state.access_token.is_some(),
            admin: state.user.as_ref().is_some_and(User::is_admin),
        }
    }

    /// Cache the signed-in user's profile.
    pub fn set_user(&self, user: User) {
        self.write().user = Some(user);
    }

    /// Install a fresh credential pair after a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair cannot be persisted. The in-memory
    /// tokens are still updated.
    pub fn establish(
        &self,
        access_token: AccessToken,
        refresh_token: RefreshToken,
    ) -> Result<(), Error> {
        let mut state = self.write();

        let persisted = self
            .inner
            .store
            .set(ACCESS_TOKEN_KEY, access_token.as_str())
            .and_then(|_| {
                self.inner
                    .store
                    .set(REFRESH_TOKEN_KEY, refresh_token.as_str())
            });

        state.access_token = Some(access_token);
        state.refresh_token = Some(refresh_token);
        state.user = None;
        info!("Session established");

        persisted.map_err(Error::from)
    }

    /// Swap in a renewed access token. The refresh token is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted. The in-memory
    /// token is still updated.
    pub fn replace_access_token(&self, access_token: AccessToken) -> Result<(), Error> {
        let mut state = self.write();
        let persisted = self.inner.store.set(ACCESS_TOKEN_KEY, access_token.as_str());
        state.access_token = Some(access_token);
        debug!("Access token replaced");
        persisted.map_err(Error::from)
    }

    /// Drop both tokens and the cached user from memory and from the store.
    ///
    /// Idempotent and infallible. Storage errors are logged and otherwise
    /// ignored so the in-memory teardown always completes. Returns whether
    /// a token was held before the call.
    pub fn clear(&self) -> bool {
        let mut state = self.write();
        let had_session = state.access_token.is_some() || state.refresh_token.is_some();

        state.access_token = None;
        state.refresh_token = None;
        state.user = None;

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.inner.store.remove(key) {
                warn!(key, error = %e, "Failed to remove token from credential store");
            }
        }

        if had_session {
            info!("Session cleared");
        }
        had_session
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("store", &self.inner.store)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
