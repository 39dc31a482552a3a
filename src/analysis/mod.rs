//! Playlist statistics.
//!
//! Pure functions, no I/O:
//! - [`aggregate`]: means, popularity buckets, audio feature averages
//! - [`playlist`]: one snapshot to [`PlaylistMetrics`]
//! - [`compare`]: two groups of metrics to a [`ComparisonResult`]
//!
//! Reductions over empty collections yield `None` rather than `NaN`.

pub mod aggregate;
pub mod compare;
pub mod playlist;

pub use aggregate::{
    audio_feature_averages, mean, mean_present, popularity_distribution, AudioFeatureAverages,
    PopularityDistribution,
};
pub use compare::{
    compare, compare_with, group_averages, AggregateComparison, CompareOptions,
    ComparisonResult, GroupAudioFeatures, GroupAverages, GroupPair,
};
pub use playlist::{analyze, PlaylistMetrics};
