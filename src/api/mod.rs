//! API client for Spotify.
//!
//! - [`SpotifyApi`]: catalog, search and browse endpoints (bearer token)
//! - [`parse_playlist_id`]: accepts ids, URIs and share URLs

pub mod spotify;

pub use spotify::{parse_playlist_id, SpotifyApi, AUDIO_FEATURES_CHUNK, PAGE_LIMIT};
