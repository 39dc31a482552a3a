//! Data models for Spotify Web API responses.
//!
//! This module contains the data structures used to represent
//! tracks, audio features, playlists, and related metadata.

pub mod common;
pub mod playlist;
pub mod track;

// Re-exports for convenience
pub use common::{Image, Owner, Page};
pub use playlist::{Playlist, PlaylistItem, SimplifiedPlaylist};
pub use track::{ArtistRef, AudioFeatures, Track};
