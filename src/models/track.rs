//! Track-related models.
//!
//! This module contains models for tracks, their artist references and
//! the per-track audio features reported by the catalog.

use serde::{Deserialize, Serialize};

/// Artist reference nested inside a track.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    /// Spotify artist id.
    pub id: String,

    /// Artist name.
    pub name: String,
}

impl ArtistRef {
    /// Create a new artist reference.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A track as returned inside a playlist listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Spotify track id. Empty for local files.
    pub id: String,

    /// Track title.
    pub name: String,

    /// Popularity score, 0-100.
    pub popularity: u32,

    /// Duration in milliseconds.
    pub duration_ms: u64,

    /// Whether the track has explicit content.
    #[serde(default)]
    pub explicit: bool,

    /// Artists who performed this track.
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// Audio descriptors for one track.
///
/// The catalog returns `null` in place of the whole object when it has no
/// analysis for a track; individual descriptors are never missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioFeatures {
    /// Track id these features belong to.
    pub id: String,

    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    /// Beats per minute.
    pub tempo: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,

    // Retained but not aggregated.
    /// Pitch class, -1 when undetected.
    pub key: i32,
    /// Decibels.
    pub loudness: f64,
    /// 1 major, 0 minor.
    pub mode: i32,
    pub speechiness: f64,
    pub liveness: f64,
    pub duration_ms: u64,
    pub time_signature: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_features_deserialize() {
        let json = r#"{
            "danceability": 0.735, "energy": 0.578, "key": 5, "loudness": -11.84,
            "mode": 0, "speechiness": 0.0461, "acousticness": 0.514,
            "instrumentalness": 0.0902, "liveness": 0.159, "valence": 0.636,
            "tempo": 98.002, "type": "audio_features", "id": "06AKEBrKUckW0KREUWRnvT",
            "duration_ms": 255349, "time_signature": 4
        }"#;
        let features: AudioFeatures = serde_json::from_str(json).unwrap();
        assert_eq!(features.id, "06AKEBrKUckW0KREUWRnvT");
        assert_eq!(features.key, 5);
        assert_eq!(features.tempo, 98.002);
    }
}
