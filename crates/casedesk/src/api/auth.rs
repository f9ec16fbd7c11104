use tracing::instrument;

use crate::auth::{AccessToken, Credentials, RefreshToken};
use crate::error::Error;
use crate::gateway::endpoints::{
    AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME, AUTH_REFRESH, AUTH_REGISTER, RefreshRequest,
    RefreshResponse,
};
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{NewUser, TokenPair, User};

/// Authentication endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `POST /api/auth/login` with a url-encoded form.
    #[instrument(skip_all, fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, Error> {
        let request = ApiRequest::post(AUTH_LOGIN).form([
            ("username", credentials.username()),
            ("password", credentials.password()),
        ]);
        self.gateway.json(request).await
    }

    /// `POST /api/auth/logout`
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), Error> {
        self.gateway.empty(ApiRequest::post(AUTH_LOGOUT)).await
    }

    /// `POST /api/auth/refresh`
    ///
    /// This is the raw call; it does not touch the session. Use
    /// [`Gateway::renew`] to renew the session's own token.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &RefreshToken) -> Result<AccessToken, Error> {
        let request = ApiRequest::post(AUTH_REFRESH).json(&RefreshRequest {
            refresh_token: refresh_token.as_str(),
        })?;
        let response: RefreshResponse = self.gateway.json(request).await?;
        Ok(AccessToken::new(response.access_token))
    }

    /// `GET /api/auth/me`
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, Error> {
        self.gateway.json(ApiRequest::get(AUTH_ME)).await
    }

    /// `POST /api/auth/register`
    #[instrument(skip_all, fields(username = %user.username))]
    pub async fn register(&self, user: &NewUser) -> Result<User, Error> {
        let request = ApiRequest::post(AUTH_REGISTER).json(user)?;
        self.gateway.json(request).await
    }
}
