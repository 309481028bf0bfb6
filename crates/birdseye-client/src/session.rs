//! Session lifecycle: token state, refresh, logout.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument, warn};

use birdseye_core::error::AuthError;
use birdseye_core::{AccessToken, CsrfToken, RefreshToken, Result, TokenKey, TokenStore};

use crate::endpoints::{RefreshRequest, RefreshResponse, SECURITY_REFRESH};
use crate::http::HttpClient;
use crate::request::RequestSpec;

/// Owns the session tokens for one client instance.
///
/// Token state lives in memory behind an `RwLock` and is mirrored into
/// the injected [`TokenStore`] on every mutation, so a persistent store
/// carries the session across processes. On construction the session
/// hydrates from whatever the store holds.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    http: HttpClient,
    store: Arc<dyn TokenStore>,
    tokens: RwLock<SessionTokens>,
    // Single-flight gate: concurrent 401s coalesce into one refresh call.
    refresh_gate: tokio::sync::Mutex<()>,
}

#[derive(Default)]
struct SessionTokens {
    access: Option<AccessToken>,
    refresh: Option<RefreshToken>,
    csrf: Option<CsrfToken>,
}

impl Session {
    pub(crate) fn new(http: HttpClient, store: Arc<dyn TokenStore>) -> Self {
        let tokens = SessionTokens {
            access: store.get(TokenKey::Access).map(AccessToken::new),
            refresh: store.get(TokenKey::Refresh).map(RefreshToken::new),
            csrf: store.get(TokenKey::Csrf).map(CsrfToken::new),
        };

        Self {
            inner: Arc::new(SessionInner {
                http,
                store,
                tokens: RwLock::new(tokens),
                refresh_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Snapshot of the current access token.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.inner.tokens.read().unwrap().access.clone()
    }

    /// Snapshot of the current refresh token.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.inner.tokens.read().unwrap().refresh.clone()
    }

    /// Snapshot of the current CSRF token.
    pub fn csrf_token(&self) -> Option<CsrfToken> {
        self.inner.tokens.read().unwrap().csrf.clone()
    }

    /// True iff an access token is held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.tokens.read().unwrap().access.is_some()
    }

    /// Install tokens from a successful login.
    pub(crate) fn install_login(&self, access: AccessToken, refresh: Option<RefreshToken>) {
        self.inner.store.set(TokenKey::Access, access.as_str());
        if let Some(token) = &refresh {
            self.inner.store.set(TokenKey::Refresh, token.as_str());
        }

        let mut tokens = self.inner.tokens.write().unwrap();
        tokens.access = Some(access);
        if refresh.is_some() {
            tokens.refresh = refresh;
        }
    }

    /// Install a freshly fetched CSRF token.
    pub(crate) fn install_csrf(&self, csrf: CsrfToken) {
        self.inner.store.set(TokenKey::Csrf, csrf.as_str());
        self.inner.tokens.write().unwrap().csrf = Some(csrf);
    }

    /// Refresh the access token using the held refresh token.
    ///
    /// # Errors
    ///
    /// [`AuthError::RefreshTokenInvalid`] when no refresh token is held or
    /// the server rejects it; transport failures pass through unchanged.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        info!("refreshing session");

        let refresh_token = self
            .refresh_token()
            .ok_or(AuthError::RefreshTokenInvalid)?;

        let request = RefreshRequest {
            refresh_token: refresh_token.as_str(),
        };
        let spec = RequestSpec::post(SECURITY_REFRESH).with_json(&request);

        let response = self.inner.http.send(&spec, None, None).await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "refresh rejected");
            return Err(AuthError::RefreshTokenInvalid.into());
        }

        let body: RefreshResponse = HttpClient::read_json(response).await?;

        self.inner.store.set(TokenKey::Access, &body.access_token);
        if let Some(token) = &body.refresh_token {
            self.inner.store.set(TokenKey::Refresh, token);
        }

        {
            let mut tokens = self.inner.tokens.write().unwrap();
            tokens.access = Some(AccessToken::new(body.access_token));
            if let Some(token) = body.refresh_token {
                tokens.refresh = Some(RefreshToken::new(token));
            }
        }

        debug!("session refreshed");
        Ok(())
    }

    /// Recover from a 401: refresh once, coalescing with any refresh
    /// already in flight.
    ///
    /// `rejected` is the access token the failed request carried. If the
    /// token rotated while this caller waited on the gate, the refresh
    /// already happened and the caller can retry immediately. On refresh
    /// failure the session is cleared.
    pub(crate) async fn refresh_after_unauthorized(
        &self,
        rejected: Option<&AccessToken>,
    ) -> Result<()> {
        let _gate = self.inner.refresh_gate.lock().await;

        let current = self.access_token();
        if current.as_ref().map(AccessToken::as_str) != rejected.map(AccessToken::as_str) {
            debug!("token already rotated by a concurrent refresh");
            return Ok(());
        }

        match self.refresh().await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "refresh failed, clearing session");
                self.clear();
                Err(err)
            }
        }
    }

    /// Drop all three tokens, in memory and in the store. Idempotent.
    pub fn clear(&self) {
        self.inner.store.clear();
        let mut tokens = self.inner.tokens.write().unwrap();
        *tokens = SessionTokens::default();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base", self.inner.http.base())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birdseye_core::{BaseUrl, MemoryTokenStore};

    fn session_with_store(store: Arc<dyn TokenStore>) -> Session {
        let base = BaseUrl::new("http://localhost:8088").unwrap();
        Session::new(HttpClient::new(base), store)
    }

    #[test]
    fn hydrates_from_store() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set(TokenKey::Access, "acc");
        store.set(TokenKey::Refresh, "ref");

        let session = session_with_store(store);

        assert!(session.is_authenticated());
        assert_eq!(session.access_token().unwrap().as_str(), "acc");
        assert_eq!(session.refresh_token().unwrap().as_str(), "ref");
        assert!(session.csrf_token().is_none());
    }

    #[test]
    fn install_login_mirrors_to_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = session_with_store(store.clone());

        session.install_login(
            AccessToken::new("acc"),
            Some(RefreshToken::new("ref")),
        );

        assert_eq!(store.get(TokenKey::Access), Some("acc".to_string()));
        assert_eq!(store.get(TokenKey::Refresh), Some("ref".to_string()));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set(TokenKey::Access, "acc");
        store.set(TokenKey::Csrf, "csrf");

        let session = session_with_store(store.clone());
        session.clear();
        session.clear();

        assert!(!session.is_authenticated());
        for key in TokenKey::ALL {
            assert_eq!(store.get(key), None);
        }
    }
}
