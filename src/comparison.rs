//! Curated vs. user playlist comparison pipeline.
//!
//! This module wires the API client to the analysis functions: fetch each
//! curated playlist, discover popular user playlists through search, analyse
//! everything in parallel and compare the two groups.

use futures_util::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::analysis::{
    analyze, compare_with, CompareOptions, ComparisonResult, PlaylistMetrics,
};
use crate::api::SpotifyApi;
use crate::error::{Result, SpotifyError};
use crate::models::{Owner, SimplifiedPlaylist};

/// Well-known platform-curated playlists.
pub const DEFAULT_CURATED_PLAYLISTS: [&str; 5] = [
    "37i9dQZF1DXcBWIGoYBM5M", // Today's Top Hits
    "37i9dQZF1DX0XUsuxWHRQd", // RapCaviar
    "37i9dQZF1DX4JAvHpjipBk", // New Music Friday
    "37i9dQZF1DX10zKzsJ2jva", // Viva Latino
    "37i9dQZF1DX4sWSpwq3LiO", // Peaceful Piano
];

/// Search terms used to discover popular user playlists.
pub const DEFAULT_SEARCH_TERMS: [&str; 5] = ["top", "best", "popular", "hits", "favorite"];

/// Settings for a comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Playlists forming the curated group.
    pub curated_playlist_ids: Vec<String>,
    /// Queries used to find user playlists.
    pub search_terms: Vec<String>,
    /// Results requested per search term.
    pub search_limit: u32,
    /// User playlists need strictly more followers than this.
    pub min_followers: u64,
    /// Size of the user group.
    pub max_user_playlists: usize,
    /// Group comparison knobs.
    pub compare_options: CompareOptions,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            curated_playlist_ids: DEFAULT_CURATED_PLAYLISTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            search_terms: DEFAULT_SEARCH_TERMS.iter().map(|s| s.to_string()).collect(),
            search_limit: 10,
            min_followers: 10_000,
            max_user_playlists: 5,
            compare_options: CompareOptions::default(),
        }
    }
}

impl ComparisonConfig {
    /// Whether a playlist qualifies for the user group.
    pub fn is_user_candidate(&self, playlist_id: &str, owner: &Owner, followers: u64) -> bool {
        !owner.is_platform()
            && followers > self.min_followers
            && !self.curated_playlist_ids.iter().any(|id| id == playlist_id)
    }
}

/// Picks user playlists out of search results, in the order offered.
#[derive(Debug)]
struct UserPlaylistSelection<'a> {
    config: &'a ComparisonConfig,
    found: Vec<String>,
}

impl<'a> UserPlaylistSelection<'a> {
    fn new(config: &'a ComparisonConfig) -> Self {
        Self {
            config,
            found: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.found.len() >= self.config.max_user_playlists
    }

    /// Whether a search hit is worth fetching details for. Already selected
    /// and platform-owned playlists are not.
    fn needs_details(&self, candidate: &SimplifiedPlaylist) -> bool {
        !self.is_full()
            && !candidate.owner.is_platform()
            && !self.found.contains(&candidate.id)
    }

    /// Consider a candidate given its follower count, or the error from
    /// fetching it. Returns whether it was selected.
    fn offer(&mut self, candidate: &SimplifiedPlaylist, followers: Result<u64>) -> bool {
        let followers = match followers {
            Ok(followers) => followers,
            Err(e) => {
                warn!("Skipping candidate {}: {}", candidate.id, e);
                return false;
            }
        };

        if !self.needs_details(candidate)
            || !self
                .config
                .is_user_candidate(&candidate.id, &candidate.owner, followers)
        {
            return false;
        }
        self.found.push(candidate.id.clone());
        true
    }

    fn into_ids(self) -> Vec<String> {
        self.found
    }
}

/// Runs the full comparison against the live API.
///
/// # Example
///
/// ```rust,no_run
/// use playlist_compare::{ClientCredentials, ComparisonConfig, PlaylistComparison, SpotifyApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = SpotifyApi::new(ClientCredentials::new("id", "secret")?)?;
///     let comparison = PlaylistComparison::new(api, ComparisonConfig::default());
///     let result = comparison.run().await?;
///     println!(
///         "{} curated, {} user",
///         result.curated_playlists.len(),
///         result.user_playlists.len()
///     );
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PlaylistComparison {
    api: SpotifyApi,
    config: ComparisonConfig,
}

impl PlaylistComparison {
    /// Create a new comparison run.
    pub fn new(api: SpotifyApi, config: ComparisonConfig) -> Self {
        Self { api, config }
    }

    /// The settings of this run.
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Fetch one playlist with all entries and audio features and compute
    /// its metrics.
    pub async fn analyze_playlist(
        &self,
        playlist_id: &str,
        is_curated: bool,
    ) -> Result<PlaylistMetrics> {
        let result = async {
            let playlist = self.api.get_playlist_snapshot(playlist_id).await?;
            let track_ids = playlist.track_ids();
            let features = self.api.get_audio_features(&track_ids).await?;
            Ok::<_, SpotifyError>(analyze(&playlist, &features, is_curated))
        }
        .await;

        match &result {
            Ok(metrics) => info!(
                "Analyzed playlist {} ({} of {} tracks)",
                metrics.playlist_name, metrics.fetched_track_count, metrics.track_count
            ),
            Err(e) => error!("Error analyzing playlist {}: {}", playlist_id, e),
        }
        result
    }

    /// Analyse several playlists concurrently. Fails if any one fails.
    pub async fn analyze_group(
        &self,
        playlist_ids: &[String],
        is_curated: bool,
    ) -> Result<Vec<PlaylistMetrics>> {
        try_join_all(
            playlist_ids
                .iter()
                .map(|id| self.analyze_playlist(id, is_curated)),
        )
        .await
    }

    /// Search for popular playlists not owned by the platform.
    ///
    /// Candidates whose details cannot be fetched are skipped.
    pub async fn find_popular_user_playlists(&self) -> Result<Vec<String>> {
        let mut selection = UserPlaylistSelection::new(&self.config);

        'terms: for term in &self.config.search_terms {
            if selection.is_full() {
                break;
            }

            let results = self
                .api
                .search_playlists(term, self.config.search_limit)
                .await?;
            debug!("Search '{}' returned {} playlists", term, results.items.len());

            for candidate in &results.items {
                if !selection.needs_details(candidate) {
                    continue;
                }
                let followers = self
                    .api
                    .get_playlist(&candidate.id)
                    .await
                    .map(|details| details.followers);
                selection.offer(candidate, followers);
                if selection.is_full() {
                    break 'terms;
                }
            }
        }

        let found = selection.into_ids();
        info!("Found {} user playlists", found.len());
        Ok(found)
    }

    /// Run the whole comparison.
    pub async fn run(&self) -> Result<ComparisonResult> {
        info!("Starting playlist comparison...");

        info!("Analyzing {} curated playlists...", self.config.curated_playlist_ids.len());
        let curated = self
            .analyze_group(&self.config.curated_playlist_ids, true)
            .await?;

        info!("Finding popular user playlists...");
        let user_ids = self.find_popular_user_playlists().await?;

        info!("Analyzing {} user playlists...", user_ids.len());
        let user = self.analyze_group(&user_ids, false).await?;

        info!("Generating comparison...");
        Ok(compare_with(curated, user, self.config.compare_options))
    }
}
