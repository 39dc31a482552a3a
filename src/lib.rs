//! # playlist-compare
//!
//! Compare platform-curated Spotify playlists with popular user-created ones.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through [`PlaylistComparison`]:
//!
//! ```rust,no_run
//! use playlist_compare::{
//!     report, ClientCredentials, ComparisonConfig, PlaylistComparison, SpotifyApi,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = ClientCredentials::new("client_id", "client_secret")?;
//!     let api = SpotifyApi::new(credentials)?;
//!
//!     let comparison = PlaylistComparison::new(api, ComparisonConfig::default());
//!     let result = comparison.run().await?;
//!     print!("{}", report::render_comparison(&result));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pure analysis
//!
//! The [`analysis`] module works on already-fetched data and performs no I/O:
//!
//! - [`analysis::analyze`] - one playlist snapshot to [`PlaylistMetrics`]
//! - [`analysis::compare`] - curated and user metrics to a [`ComparisonResult`]
//!
//! ## Lower-level pieces
//!
//! - [`SpotifyApi`] - Web API client (playlists, audio features, search)
//! - [`auth`] - client-credentials flow with an explicit [`TokenCache`]
//! - [`converters`] - raw JSON to models

pub mod analysis;
pub mod api;
pub mod auth;
mod comparison;
pub mod converters;
pub mod error;
pub mod models;
pub mod report;

// Main interface (recommended)
pub use comparison::{
    ComparisonConfig, PlaylistComparison, DEFAULT_CURATED_PLAYLISTS, DEFAULT_SEARCH_TERMS,
};

// Analysis results
pub use analysis::{CompareOptions, ComparisonResult, PlaylistMetrics};

// Low-level APIs
pub use api::SpotifyApi;
pub use auth::{ClientCredentials, SpotifyAuth, TokenCache};
pub use error::SpotifyError;
pub use models::{AudioFeatures, Playlist, PlaylistItem, Track};
