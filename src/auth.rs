//! Client-credentials authentication for the Spotify Web API.
//!
//! Tokens are kept in an explicit [`TokenCache`] that is handed to
//! [`SpotifyAuth`]. Clones of a cache share the same slot, so one cache can
//! back several clients.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::error::{Result, SpotifyError};

/// Token endpoint for the client-credentials flow.
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// A token is treated as expired this long before it actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Application credentials issued by the Spotify developer dashboard.
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl ClientCredentials {
    /// Create credentials, rejecting empty values.
    pub fn new<S1, S2>(client_id: S1, client_secret: S2) -> Result<Self>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(SpotifyError::MissingCredentials);
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// The public client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// An access token together with its expiry time.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedToken {
    /// Bearer token value.
    pub access_token: String,
    /// Instant after which the API rejects the token.
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Build a token that expires `expires_in` seconds after `issued_at`.
    pub fn new<S: Into<String>>(
        access_token: S,
        issued_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: issued_at + TimeDelta::seconds(expires_in),
        }
    }

    /// Whether the token can still be used at `now`, keeping a one-minute margin.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - TimeDelta::seconds(EXPIRY_MARGIN_SECS)
    }
}

/// Shared slot holding the current access token.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token value if it is still fresh at `now`.
    pub async fn fresh_token(&self, now: DateTime<Utc>) -> Option<String> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|token| token.is_fresh_at(now))
            .map(|token| token.access_token.clone())
    }

    /// Replace the cached token.
    pub async fn store(&self, token: CachedToken) {
        *self.slot.write().await = Some(token);
    }

    /// Drop the cached token, forcing the next request to re-authenticate.
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    /// Snapshot of the cached token, fresh or not.
    pub async fn current(&self) -> Option<CachedToken> {
        self.slot.read().await.clone()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    expires_in: i64,
}

/// Fetches and caches bearer tokens with the client-credentials flow.
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    client: Client,
    credentials: ClientCredentials,
    cache: TokenCache,
    token_url: String,
}

impl SpotifyAuth {
    /// Create an authenticator with its own empty cache.
    pub fn new(client: Client, credentials: ClientCredentials) -> Self {
        Self::with_cache(client, credentials, TokenCache::new())
    }

    /// Create an authenticator backed by an existing cache.
    pub fn with_cache(client: Client, credentials: ClientCredentials, cache: TokenCache) -> Self {
        Self {
            client,
            credentials,
            cache,
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Point the authenticator at a different token endpoint.
    pub fn with_token_url<S: Into<String>>(mut self, token_url: S) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Get a valid access token, requesting a new one when the cached token
    /// is missing or about to expire.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cache.fresh_token(Utc::now()).await {
            return Ok(token);
        }

        let token = self.request_token().await?;
        let value = token.access_token.clone();
        self.cache.store(token).await;
        Ok(value)
    }

    /// Request a new token from the token endpoint.
    async fn request_token(&self) -> Result<CachedToken> {
        debug!("POST {}", self.token_url);

        let issued_at = Utc::now();
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error_description")
                .or_else(|| body.get("error"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| status.to_string());
            error!("Token request rejected: {}", message);
            return Err(SpotifyError::AuthFailed(message));
        }

        let body: TokenResponse = response.json().await?;
        info!(
            "Obtained access token for client {}, valid for {}s",
            self.credentials.client_id(),
            body.expires_in
        );

        Ok(CachedToken::new(body.access_token, issued_at, body.expires_in))
    }
}
