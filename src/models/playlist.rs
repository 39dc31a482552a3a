//! Playlist-related models.
//!
//! This module contains models for representing playlists, the track
//! entries they hold, and the trimmed-down form returned by search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Image, Owner};
use super::track::Track;

/// One entry of a playlist: a track and when it was added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistItem {
    /// When the track was added to the playlist.
    pub added_at: DateTime<Utc>,

    /// The track itself.
    pub track: Track,
}

impl PlaylistItem {
    /// Create a new playlist item.
    pub fn new(track: Track, added_at: DateTime<Utc>) -> Self {
        Self { added_at, track }
    }
}

/// A playlist snapshot: metadata plus the items actually retrieved.
///
/// `total_tracks` is the count declared by the API; `items` may be shorter
/// when pagination was incomplete or entries were unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    /// Spotify playlist id.
    pub id: String,

    /// Playlist name.
    pub name: String,

    /// Playlist description. Empty when not set.
    #[serde(default)]
    pub description: String,

    /// Number of followers.
    pub followers: u64,

    /// Playlist owner.
    pub owner: Owner,

    /// Declared total number of tracks.
    pub total_tracks: u32,

    /// Retrieved entries, in API order.
    #[serde(default)]
    pub items: Vec<PlaylistItem>,

    /// Playlist cover images.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Whether the playlist is public, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Whether other users may edit the playlist.
    #[serde(default)]
    pub collaborative: bool,

    /// Version identifier of the playlist contents.
    #[serde(default)]
    pub snapshot_id: String,
}

impl Playlist {
    /// Tracks in API order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.items.iter().map(|item| &item.track)
    }

    /// Ids of all retrievable tracks, skipping local files.
    pub fn track_ids(&self) -> Vec<String> {
        self.tracks()
            .filter(|t| !t.id.is_empty())
            .map(|t| t.id.clone())
            .collect()
    }

    /// Number of entries actually retrieved.
    pub fn fetched_track_count(&self) -> usize {
        self.items.len()
    }
}

/// Playlist as returned by search and browse endpoints.
///
/// Carries no follower count and no items; fetch the full [`Playlist`]
/// for those.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimplifiedPlaylist {
    /// Spotify playlist id.
    pub id: String,

    /// Playlist name.
    pub name: String,

    /// Playlist description.
    #[serde(default)]
    pub description: String,

    /// Playlist owner.
    pub owner: Owner,

    /// Declared total number of tracks.
    pub total_tracks: u32,
}
