//! Client construction, the dispatch pipeline, and authentication
//! operations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use birdseye_core::error::AuthError;
use birdseye_core::{
    AccessToken, BaseUrl, Credentials, CsrfToken, Error, MemoryTokenStore, RefreshToken, Result,
    TokenStore,
};

use crate::endpoints::{
    AUTH_PROVIDER, LoginRequest, LoginResponse, ME, ResultEnvelope, SECURITY_CSRF_TOKEN,
    SECURITY_LOGIN, UserProfile,
};
use crate::http::HttpClient;
use crate::request::RequestSpec;
use crate::session::Session;

/// Client for a Superset-compatible BI server.
///
/// Every operation goes through the same dispatch pipeline: the bearer
/// token is attached when held, a 401 is recovered from by at most one
/// refresh-and-resend, and every other failure maps onto the error
/// taxonomy unchanged.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    session: Session,
}

impl Client {
    /// Create a client with an in-memory token store. The session does
    /// not survive the process.
    pub fn new(base: BaseUrl) -> Self {
        Self::with_store(base, Arc::new(MemoryTokenStore::new()))
    }

    /// Create a client backed by a persistent token store. Tokens the
    /// store already holds are picked up immediately.
    pub fn with_store(base: BaseUrl, store: Arc<dyn TokenStore>) -> Self {
        let http = HttpClient::new(base);
        let session = Session::new(http.clone(), store);
        Self { http, session }
    }

    /// The server base URL.
    pub fn base(&self) -> &BaseUrl {
        self.http.base()
    }

    /// The session handle owning this client's tokens.
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Log in with username/password credentials.
    ///
    /// On success the access and refresh tokens are installed and a CSRF
    /// token is fetched best-effort (its failure is not an error; the
    /// backend treats CSRF protection as optional).
    ///
    /// # Errors
    ///
    /// [`AuthError::LoginFailed`] when the server answers with an error
    /// status, [`AuthError::MissingAccessToken`] when a success response
    /// carries no access token. Neither persists any token.
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        info!("logging in");

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
            provider: AUTH_PROVIDER,
            refresh: true,
        };
        let spec = RequestSpec::post(SECURITY_LOGIN).with_json(&request);

        let response = self.http.send(&spec, None, None).await?;
        if !response.status().is_success() {
            let err = HttpClient::error_from(response).await;
            return Err(AuthError::LoginFailed {
                status: err.status,
                message: err.message().map(str::to_string),
            }
            .into());
        }

        let body: LoginResponse = HttpClient::read_json(response).await?;
        let Some(access_token) = body.access_token else {
            return Err(AuthError::MissingAccessToken.into());
        };

        self.session.install_login(
            AccessToken::new(access_token),
            body.refresh_token.map(RefreshToken::new),
        );
        info!("login succeeded");

        if let Some(token) = self.fetch_csrf_token().await {
            self.session.install_csrf(CsrfToken::new(token));
        }

        Ok(())
    }

    /// Fetch a CSRF token, returning `None` on any failure: the backend
    /// works without one, so this never surfaces an error.
    #[instrument(skip(self))]
    pub async fn fetch_csrf_token(&self) -> Option<String> {
        let spec = RequestSpec::get(SECURITY_CSRF_TOKEN);
        match self.dispatch::<ResultEnvelope<String>>(spec).await {
            Ok(envelope) => Some(envelope.result),
            Err(err) => {
                warn!(error = %err, "CSRF token fetch failed, continuing without");
                None
            }
        }
    }

    /// The authenticated user's profile.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.dispatch_result(RequestSpec::get(ME)).await
    }

    /// Drop the session: clears all three tokens, locally and in the
    /// store. Idempotent; no network call.
    pub fn logout(&self) {
        info!("logging out");
        self.session.clear();
    }

    /// True iff an access token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // ========================================================================
    // Dispatch pipeline
    // ========================================================================

    /// Send a request and deserialize the success body.
    pub(crate) async fn dispatch<R: DeserializeOwned>(&self, spec: RequestSpec) -> Result<R> {
        let response = self.send_with_retry(&spec).await?;
        HttpClient::read_json(response).await
    }

    /// Send a request and unwrap the `{ "result": ... }` envelope.
    pub(crate) async fn dispatch_result<R: DeserializeOwned>(
        &self,
        spec: RequestSpec,
    ) -> Result<R> {
        let envelope: ResultEnvelope<R> = self.dispatch(spec).await?;
        Ok(envelope.result)
    }

    /// Send a request and read the success body as plain text.
    pub(crate) async fn dispatch_text(&self, spec: RequestSpec) -> Result<String> {
        let response = self.send_with_retry(&spec).await?;
        HttpClient::read_text(response).await
    }

    /// The shared send loop: one original attempt, at most one
    /// refresh-and-resend after a 401, every other failure surfaced
    /// unchanged.
    async fn send_with_retry(&self, spec: &RequestSpec) -> Result<reqwest::Response> {
        let mut retried = false;

        loop {
            let access = self.session.access_token();
            let csrf = self.session.csrf_token();

            debug!(method = %spec.method, path = spec.path(), retried, "dispatching");
            let response = self.http.send(spec, access.as_ref(), csrf.as_ref()).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status.as_u16() == 401 {
                if retried {
                    // The retried request was rejected again; give up.
                    return Err(AuthError::SessionExpired.into());
                }
                retried = true;

                info!(path = spec.path(), "access token rejected, refreshing");
                match self.session.refresh_after_unauthorized(access.as_ref()).await {
                    Ok(()) => continue,
                    // The session is already cleared; surface the original
                    // 401 as an auth error.
                    Err(_) => return Err(AuthError::SessionExpired.into()),
                }
            }

            return Err(Error::Api(HttpClient::error_from(response).await));
        }
    }
}
