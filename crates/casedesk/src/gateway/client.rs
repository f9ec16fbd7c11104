//! The gateway itself.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue,
};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace, warn};

use crate::auth::{AccessToken, SessionContext};
use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError, Error, TransportError};
use crate::router::{Navigation, Navigator};
use crate::types::ApiUrl;

use super::endpoints::{AUTH_REFRESH, RefreshRequest, RefreshResponse};
use super::request::{ApiRequest, Attempt, RequestBody};

/// HTTP client that keeps the session's access token fresh.
///
/// For every request:
/// - `Authorization: Bearer <access>` is attached when an access token is
///   held, and nothing is attached otherwise;
/// - a 401 on the first attempt renews the access token with the refresh
///   token and sends the request once more;
/// - a 401 with no refresh token, or from the refresh endpoint itself,
///   tears the session down and returns the 401;
/// - a failed renewal tears the session down and returns
///   [`AuthError::RenewalFailed`];
/// - transport errors, timeouts included, are returned as they are.
///
/// Teardown clears the [`SessionContext`] and sends the [`Navigator`] to
/// the login entry point.
///
/// Renewals are serialized. A request that hit a 401 while another
/// request was renewing reuses the new token instead of refreshing again.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    http: reqwest::Client,
    base_url: ApiUrl,
    timeout: Duration,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
    renewal: Mutex<()>,
}

/// A binary response body.
#[derive(Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// From `Content-Disposition`, if the server named the file.
    pub file_name: Option<String>,
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl Gateway {
    /// Create a gateway over `session`, reporting teardowns to `navigator`.
    pub fn new(
        config: &ClientConfig,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            inner: Arc::new(GatewayInner {
                http,
                base_url: config.base_url.clone(),
                timeout: config.timeout,
                session,
                navigator,
                renewal: Mutex::new(()),
            }),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base_url
    }

    /// Absolute URL for an endpoint path, for links the user opens directly.
    pub fn url_for(&self, path: &str) -> String {
        self.inner.base_url.endpoint(path)
    }

    /// Send a request and return the successful response.
    ///
    /// # Errors
    ///
    /// Non-2xx responses become [`Error::Api`]; see the type docs for the
    /// 401 handling.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, Error> {
        let mut attempt = Attempt::new(request);

        loop {
            let sent_with = self.inner.session.access_token();
            let response = self.transmit(&attempt.request, sent_with.as_ref()).await?;
            let status = response.status();
            trace!(%status, "Response received");

            if status.is_success() {
                return Ok(response);
            }

            let error = read_api_error(response).await;
            if status != StatusCode::UNAUTHORIZED {
                return Err(error.into());
            }

            if !attempt.mark_retried() {
                debug!("Unauthorized after retry, giving up");
                return Err(error.into());
            }

            let has_refresh = self.inner.session.refresh_token().is_some();
            if !has_refresh || attempt.request.path == AUTH_REFRESH {
                debug!(has_refresh, "Unauthorized and cannot renew");
                self.teardown();
                return Err(error.into());
            }

            match self.renew_after(sent_with.as_ref()).await {
                Ok(Renewal::Renewed) => debug!("Retrying with renewed token"),
                Ok(Renewal::SessionGone) => {
                    debug!("Session torn down by a concurrent request");
                    return Err(error.into());
                }
                Err(e) => {
                    warn!(error = %e, "Token renewal failed");
                    self.teardown();
                    return Err(AuthError::RenewalFailed {
                        source: Box::new(e),
                    }
                    .into());
                }
            }
        }
    }

    /// Send a request and decode its JSON body.
    pub async fn json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, Error> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.inner.timeout))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            TransportError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Send a request whose response body is of no interest.
    pub async fn empty(&self, request: ApiRequest) -> Result<(), Error> {
        self.send(request).await.map(|_| ())
    }

    /// Send a request and collect a binary body.
    pub async fn download(&self, request: ApiRequest) -> Result<Download, Error> {
        let response = self.send(request).await?;
        let headers = response.headers();

        let content_type = header_str(headers, &CONTENT_TYPE);
        let file_name = header_str(headers, &CONTENT_DISPOSITION)
            .and_then(|value| disposition_file_name(&value));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.inner.timeout))?;

        debug!(len = bytes.len(), ?file_name, "Download complete");
        Ok(Download {
            bytes: bytes.to_vec(),
            content_type,
            file_name,
        })
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Only the access token is replaced. The session is left alone on
    /// failure; tearing it down is the caller's decision.
    ///
    /// # Errors
    ///
    /// [`AuthError::NoRefreshToken`] when none is held, otherwise whatever
    /// the refresh call returned.
    #[instrument(skip(self))]
    pub async fn renew(&self) -> Result<AccessToken, Error> {
        let _guard = self.inner.renewal.lock().await;
        self.renew_locked().await
    }

    async fn renew_after(&self, sent_with: Option<&AccessToken>) -> Result<Renewal, Error> {
        let _guard = self.inner.renewal.lock().await;

        let session = &self.inner.session;
        let current = session.access_token();
        if current.is_none() && session.refresh_token().is_none() {
            return Ok(Renewal::SessionGone);
        }
        if current.is_some() && current.as_ref() != sent_with {
            debug!("Access token already renewed by a concurrent request");
            return Ok(Renewal::Renewed);
        }

        self.renew_locked().await.map(|_| Renewal::Renewed)
    }

    async fn renew_locked(&self) -> Result<AccessToken, Error> {
        let session = &self.inner.session;
        let refresh = session.refresh_token().ok_or(AuthError::NoRefreshToken)?;

        let request = ApiRequest::post(AUTH_REFRESH).json(&RefreshRequest {
            refresh_token: refresh.as_str(),
        })?;

        debug!("Renewing access token");
        let response = self
            .transmit(&request, session.access_token().as_ref())
            .await?;
        if !response.status().is_success() {
            return Err(read_api_error(response).await.into());
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.inner.timeout))?;

        let token = AccessToken::new(body.access_token);
        if let Err(e) = session.replace_access_token(token.clone()) {
            warn!(error = %e, "Renewed token kept in memory only");
        }
        info!("Access token renewed");
        Ok(token)
    }

    fn teardown(&self) {
        let had_session = self.inner.session.clear();
        info!(had_session, "Session torn down, redirecting to login");
        self.inner.navigator.navigate(Navigation::Login);
    }

    async fn transmit(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url_for(&request.path);
        let mut builder = self.inner.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token.bearer());
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Multipart(form) => builder.multipart(form.to_form()?),
        };

        trace!(%url, authorized = token.is_some(), "Sending request");
        builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.inner.timeout).into())
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

/// Outcome of waiting for the renewal lock after a 401.
#[derive(Debug, PartialEq, Eq)]
enum Renewal {
    /// A fresh access token is held; the request can be retried.
    Renewed,
    /// Another request already tore the session down.
    SessionGone,
}

async fn read_api_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_body(status, &body)
}

fn header_str(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Pull the file name out of a `Content-Disposition` value, preferring the
/// RFC 5987 `filename*` form when it decodes.
fn disposition_file_name(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for param in value.split(';').map(str::trim) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = extended_file_name(raw.trim()),
            "filename" => plain = Some(raw.trim().trim_matches('"').to_string()),
            _ => {}
        }
    }
    extended.or(plain).filter(|name| !name.is_empty())
}

// charset'language'percent-encoded-name
fn extended_file_name(raw: &str) -> Option<String> {
    let encoded = raw.splitn(3, '\'').nth(2)?;
    // urlencoding passes stray '%' through untouched
    let well_formed = encoded.split('%').skip(1).all(|chunk| {
        chunk
            .as_bytes()
            .get(..2)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|name| name.into_owned())
}
