//! Numeric reductions over tracks and audio features.
//!
//! Every reduction that divides by a count returns `None` for empty input
//! instead of a non-finite value.

use serde::{Deserialize, Serialize};

use crate::models::{AudioFeatures, Track};

/// Tracks strictly above this score count as highly popular.
pub const HIGH_POPULARITY_THRESHOLD: u32 = 70;

/// Tracks at or below this score count as low popularity.
pub const LOW_POPULARITY_THRESHOLD: u32 = 30;

/// Arithmetic mean, `None` when there are no values.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean over the present values only.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    mean(values.into_iter().flatten())
}

/// Share of tracks per popularity bucket, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopularityDistribution {
    /// Popularity above 70.
    pub high: f64,
    /// Popularity in 31..=70.
    pub medium: f64,
    /// Popularity 30 or below.
    pub low: f64,
}

impl PopularityDistribution {
    /// Sum of the three buckets; 100 up to rounding.
    pub fn total(&self) -> f64 {
        self.high + self.medium + self.low
    }
}

/// Bucket tracks by popularity.
///
/// Percentages are relative to the number of tracks given, not to any
/// declared playlist total.
pub fn popularity_distribution<'a, I>(tracks: I) -> Option<PopularityDistribution>
where
    I: IntoIterator<Item = &'a Track>,
{
    let (mut high, mut medium, mut low) = (0usize, 0usize, 0usize);
    for track in tracks {
        if track.popularity > HIGH_POPULARITY_THRESHOLD {
            high += 1;
        } else if track.popularity > LOW_POPULARITY_THRESHOLD {
            medium += 1;
        } else {
            low += 1;
        }
    }

    let total = high + medium + low;
    if total == 0 {
        return None;
    }
    let percent = |n: usize| n as f64 / total as f64 * 100.0;

    Some(PopularityDistribution {
        high: percent(high),
        medium: percent(medium),
        low: percent(low),
    })
}

/// Mean of the six aggregated audio descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatureAverages {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub tempo: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
}

/// Average the descriptors of all resolved feature sets.
///
/// Absent entries are skipped and do not count towards the divisor.
/// Returns `None` when nothing was resolved.
pub fn audio_feature_averages<'a, I>(features: I) -> Option<AudioFeatureAverages>
where
    I: IntoIterator<Item = Option<&'a AudioFeatures>>,
{
    let resolved: Vec<&AudioFeatures> = features.into_iter().flatten().collect();
    let field = |f: fn(&AudioFeatures) -> f64| mean(resolved.iter().copied().map(f));

    Some(AudioFeatureAverages {
        danceability: field(|f| f.danceability)?,
        energy: field(|f| f.energy)?,
        valence: field(|f| f.valence)?,
        tempo: field(|f| f.tempo)?,
        acousticness: field(|f| f.acousticness)?,
        instrumentalness: field(|f| f.instrumentalness)?,
    })
}
