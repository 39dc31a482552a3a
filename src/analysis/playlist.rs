//! Per-playlist metrics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{
    audio_feature_averages, mean, popularity_distribution, AudioFeatureAverages,
    PopularityDistribution,
};
use crate::models::{AudioFeatures, Playlist, PlaylistItem};

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Metrics derived from one playlist snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistMetrics {
    pub playlist_id: String,
    pub playlist_name: String,
    pub is_curated: bool,
    pub follower_count: u64,
    /// Track count declared by the API.
    pub track_count: u32,
    /// Entries actually retrieved.
    pub fetched_track_count: usize,
    /// `None` for an empty playlist.
    pub average_popularity: Option<f64>,
    /// Description length in characters.
    pub description_length: usize,
    /// Most recent `added_at`, `None` for an empty playlist.
    pub last_updated: Option<DateTime<Utc>>,
    /// `None` when no track had audio features.
    pub audio_feature_averages: Option<AudioFeatureAverages>,
    /// `None` for an empty playlist.
    pub popularity_distribution: Option<PopularityDistribution>,
    /// Mean days between additions, 0 with fewer than two entries.
    pub update_frequency_days: f64,
}

/// Compute the metrics of one playlist.
///
/// Audio features are matched to tracks by id, so `features` may come in
/// any order and may contain `None` for tracks the catalog could not
/// analyse. Pure function of its inputs.
pub fn analyze(
    playlist: &Playlist,
    features: &[Option<AudioFeatures>],
    is_curated: bool,
) -> PlaylistMetrics {
    let by_id: HashMap<&str, &AudioFeatures> = features
        .iter()
        .flatten()
        .map(|f| (f.id.as_str(), f))
        .collect();
    let matched = playlist
        .tracks()
        .map(|track| by_id.get(track.id.as_str()).copied());

    PlaylistMetrics {
        playlist_id: playlist.id.clone(),
        playlist_name: playlist.name.clone(),
        is_curated,
        follower_count: playlist.followers,
        track_count: playlist.total_tracks,
        fetched_track_count: playlist.fetched_track_count(),
        average_popularity: mean(playlist.tracks().map(|t| f64::from(t.popularity))),
        description_length: playlist.description.chars().count(),
        last_updated: last_updated(&playlist.items),
        audio_feature_averages: audio_feature_averages(matched),
        popularity_distribution: popularity_distribution(playlist.tracks()),
        update_frequency_days: update_frequency_days(&playlist.items),
    }
}

/// Latest addition time across all entries.
pub fn last_updated(items: &[PlaylistItem]) -> Option<DateTime<Utc>> {
    items.iter().map(|item| item.added_at).max()
}

/// Span between the oldest and newest addition divided by the number of
/// gaps, in days. Assumes uniform spacing.
pub fn update_frequency_days(items: &[PlaylistItem]) -> f64 {
    if items.len() < 2 {
        return 0.0;
    }

    let newest = items.iter().map(|i| i.added_at).max();
    let oldest = items.iter().map(|i| i.added_at).min();
    match (newest, oldest) {
        (Some(newest), Some(oldest)) => {
            let span_days = (newest - oldest).num_milliseconds() as f64 / MILLIS_PER_DAY;
            span_days / (items.len() - 1) as f64
        }
        _ => 0.0,
    }
}
