//! Spotify Web API client.
//!
//! This module provides a client for the read-only catalog endpoints of
//! the Spotify Web API (api.spotify.com) used by the comparison: playlist
//! details and entries, audio features, search and browse.

use futures_util::future::try_join_all;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::auth::{ClientCredentials, SpotifyAuth};
use crate::converters;
use crate::error::{Result, SpotifyError};
use crate::models::{AudioFeatures, Page, Playlist, PlaylistItem, SimplifiedPlaylist};

/// Base URL for the Spotify Web API.
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Largest page the playlist-items endpoint returns.
pub const PAGE_LIMIT: u32 = 100;

/// Largest number of ids accepted by `/audio-features`.
pub const AUDIO_FEATURES_CHUNK: usize = 100;

/// Spotify Web API client.
///
/// Every request carries a bearer token from the wrapped [`SpotifyAuth`].
/// Failed responses are classified by status into [`SpotifyError`]
/// variants; nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use playlist_compare::{ClientCredentials, SpotifyApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = SpotifyApi::new(ClientCredentials::new("id", "secret")?)?;
///     let playlist = api.get_playlist_snapshot("37i9dQZF1DXcBWIGoYBM5M").await?;
///     println!("{}: {} followers", playlist.name, playlist.followers);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyApi {
    client: Client,
    auth: SpotifyAuth,
    base_url: String,
}

impl SpotifyApi {
    /// Create a new client with its own token cache.
    pub fn new(credentials: ClientCredentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("playlist-compare/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let auth = SpotifyAuth::new(client.clone(), credentials);
        Ok(Self::with_auth(client, auth))
    }

    /// Create a client from an existing HTTP client and authenticator.
    pub fn with_auth(client: Client, auth: SpotifyAuth) -> Self {
        Self {
            client,
            auth,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Make an authenticated GET request to the API.
    async fn get_api(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {} with params: {:?}", url, params);

        let token = self.auth.access_token().await?;
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            error!("Spotify API error on {}: {} {}", endpoint, status, message);
            return Err(SpotifyError::from_status(status.as_u16(), message));
        }

        let data: Value = response.json().await?;
        Ok(data)
    }

    /// Get playlist details. Only the first page of entries is included.
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let json = self.get_api(&format!("/playlists/{}", playlist_id), &[]).await?;
        let playlist = converters::parse_playlist(&json)?;
        debug!(
            "Playlist {} has {} followers",
            playlist.id, playlist.followers
        );
        Ok(playlist)
    }

    /// Get one page of playlist entries.
    ///
    /// Unusable entries (removed tracks) are kept as `None`.
    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<Option<PlaylistItem>>> {
        let json = self
            .get_api(
                &format!("/playlists/{}/tracks", playlist_id),
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;
        converters::parse_playlist_items_page(&json)
    }

    /// Get all entries of a playlist, following pagination until a short
    /// page is returned.
    pub async fn get_all_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        let mut pages = PageAccumulator::default();
        let mut offset = 0u32;

        loop {
            let page = self
                .get_playlist_tracks(playlist_id, PAGE_LIMIT, offset)
                .await?;
            if !pages.push_page(page, PAGE_LIMIT) {
                break;
            }
            offset += PAGE_LIMIT;
        }

        if pages.skipped > 0 {
            warn!(
                "Skipped {} unavailable entries in playlist {}",
                pages.skipped, playlist_id
            );
        }
        debug!(
            "Fetched {} entries for playlist {}",
            pages.items.len(),
            playlist_id
        );

        Ok(pages.items)
    }

    /// Get playlist details together with every retrievable entry.
    pub async fn get_playlist_snapshot(&self, playlist_id: &str) -> Result<Playlist> {
        let (mut playlist, items) = tokio::try_join!(
            self.get_playlist(playlist_id),
            self.get_all_playlist_tracks(playlist_id)
        )?;
        playlist.items = items;
        Ok(playlist)
    }

    /// Get audio features for a list of track ids.
    ///
    /// Ids are requested in chunks of [`AUDIO_FEATURES_CHUNK`], all chunks in
    /// parallel. The result is in request order; tracks without an analysis
    /// are `None`.
    pub async fn get_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let requests = track_ids.chunks(AUDIO_FEATURES_CHUNK).map(|chunk| async move {
            let json = self
                .get_api("/audio-features", &[("ids", chunk.join(","))])
                .await?;
            converters::parse_audio_features_response(&json)
        });

        let chunks = try_join_all(requests).await?;
        let features: Vec<_> = chunks.into_iter().flatten().collect();

        let missing = features.iter().filter(|f| f.is_none()).count();
        if missing > 0 {
            warn!("No audio features for {} of {} tracks", missing, track_ids.len());
        }

        Ok(features)
    }

    /// Search for playlists.
    pub async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Page<SimplifiedPlaylist>> {
        let json = self
            .get_api(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "playlist".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        converters::parse_playlist_listing(&json)
    }

    /// Get the platform's featured playlists.
    pub async fn get_featured_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedPlaylist>> {
        let json = self
            .get_api(
                "/browse/featured-playlists",
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;
        converters::parse_playlist_listing(&json)
    }

    /// Get the playlists of a browse category.
    pub async fn get_category_playlists(
        &self,
        category_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<SimplifiedPlaylist>> {
        let json = self
            .get_api(
                &format!("/browse/categories/{}/playlists", category_id),
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;
        converters::parse_playlist_listing(&json)
    }
}

/// Collects playlist entries across pages.
///
/// Unusable entries still count toward the page length, so a full page of
/// mostly removed tracks does not end pagination early.
#[derive(Debug, Default)]
pub(crate) struct PageAccumulator {
    pub(crate) items: Vec<PlaylistItem>,
    pub(crate) skipped: usize,
}

impl PageAccumulator {
    /// Add one page. Returns `true` when another page should be requested.
    pub(crate) fn push_page(&mut self, page: Page<Option<PlaylistItem>>, limit: u32) -> bool {
        let is_last = page.is_last(limit);
        for item in page.items {
            match item {
                Some(item) => self.items.push(item),
                None => self.skipped += 1,
            }
        }
        !is_last
    }
}

/// Extract a playlist id from a bare id, a `spotify:playlist:` URI or an
/// `open.spotify.com/playlist/` URL.
pub fn parse_playlist_id(input: &str) -> Result<String> {
    let trimmed = input.trim();

    let candidate = if let Some(id) = trimmed.strip_prefix("spotify:playlist:") {
        id
    } else if let Some((_, rest)) = trimmed.split_once("open.spotify.com/playlist/") {
        rest.split(['?', '/', '#']).next().unwrap_or(rest)
    } else {
        trimmed
    };

    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(candidate.to_string())
    } else {
        Err(SpotifyError::InvalidId(input.to_string()))
    }
}
