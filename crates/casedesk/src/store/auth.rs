use tracing::{debug, info, instrument, warn};

use crate::api::AuthApi;
use crate::auth::{AccessToken, Credentials, RefreshToken};
use crate::error::{AuthError, Error};
use crate::gateway::Gateway;
use crate::models::{TokenPair, User};

use super::state::RequestState;

/// Message shown when a login fails without a backend explanation.
pub const LOGIN_FAILED: &str = "Login failed";

/// Sign-in state and the operations that change it.
///
/// Tokens and the cached profile live in the gateway's
/// [`SessionContext`](crate::SessionContext); this store drives the auth
/// endpoints and tracks request state.
#[derive(Debug)]
pub struct AuthStore {
    gateway: Gateway,
    state: RequestState,
}

impl AuthStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            state: RequestState::default(),
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn user(&self) -> Option<User> {
        self.gateway.session().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.gateway.session().is_admin()
    }

    /// Sign in, persist the token pair and load the user's profile.
    #[instrument(skip_all, fields(username = %credentials.username()))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<TokenPair, Error> {
        let gateway = &self.gateway;
        let pair = self
            .state
            .track(LOGIN_FAILED, async {
                let pair = AuthApi::new(gateway).login(credentials).await?;
                gateway.session().establish(
                    AccessToken::new(pair.access_token.clone()),
                    RefreshToken::new(pair.refresh_token.clone()),
                )?;
                Ok(pair)
            })
            .await?;

        info!("Logged in");
        self.check_auth().await;
        Ok(pair)
    }

    /// Sign out. Never fails and may be called with no session.
    ///
    /// The backend is told on a best-effort basis when a session exists;
    /// its failure is logged and ignored. Local state is cleared either way.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        self.state.loading = true;

        if self.gateway.session().is_authenticated()
            && let Err(e) = AuthApi::new(&self.gateway).logout().await
        {
            warn!(error = %e, "Logout request failed, clearing session anyway");
        }

        if self.gateway.session().clear() {
            info!("Logged out");
        }
        self.state.loading = false;
    }

    /// Renew the access token. A failure signs the user out locally; the
    /// backend is not told since the dead session cannot authenticate.
    ///
    /// # Errors
    ///
    /// [`AuthError::NoRefreshToken`] without a refresh token, otherwise the
    /// renewal failure.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&mut self) -> Result<AccessToken, Error> {
        if self.gateway.session().refresh_token().is_none() {
            return Err(AuthError::NoRefreshToken.into());
        }

        match self.gateway.renew().await {
            Ok(token) => Ok(token),
            Err(e) => {
                warn!(error = %e, "Token renewal failed, signing out");
                self.gateway.session().clear();
                self.logout().await;
                Err(e)
            }
        }
    }

    /// Confirm the held token by loading the user's profile.
    ///
    /// Returns false without a token. Any failure means the token is no
    /// good: the user is signed out and false is returned.
    #[instrument(skip(self))]
    pub async fn check_auth(&mut self) -> bool {
        if !self.gateway.session().is_authenticated() {
            return false;
        }

        self.state.loading = true;
        let result = AuthApi::new(&self.gateway).me().await;
        self.state.loading = false;

        match result {
            Ok(user) => {
                debug!(username = %user.username, role = ?user.role, "Session confirmed");
                self.gateway.session().set_user(user);
                true
            }
            Err(e) => {
                debug!(error = %e, "Session check failed");
                self.logout().await;
                false
            }
        }
    }
}
