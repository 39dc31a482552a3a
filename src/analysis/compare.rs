//! Group-level comparison of curated and user playlists.

use serde::{Deserialize, Serialize};

use super::aggregate::{mean, mean_present, AudioFeatureAverages};
use super::playlist::PlaylistMetrics;

/// Knobs for the group comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Also aggregate acousticness and instrumentalness at group level.
    pub include_all_audio_features: bool,
}

/// Group means of the per-playlist audio feature averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupAudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub tempo: f64,
    /// Only with [`CompareOptions::include_all_audio_features`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acousticness: Option<f64>,
    /// Only with [`CompareOptions::include_all_audio_features`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrumentalness: Option<f64>,
}

/// Averages for one group of playlists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupAverages {
    pub followers: Option<f64>,
    pub popularity: Option<f64>,
    pub audio_features: Option<GroupAudioFeatures>,
}

/// One value per group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupPair<T> {
    pub curated: T,
    pub user: T,
}

/// Side-by-side group averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateComparison {
    pub average_followers: GroupPair<Option<f64>>,
    pub average_track_popularity: GroupPair<Option<f64>>,
    pub audio_features: GroupPair<Option<GroupAudioFeatures>>,
}

/// Both groups' per-playlist metrics and their comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub curated_playlists: Vec<PlaylistMetrics>,
    pub user_playlists: Vec<PlaylistMetrics>,
    pub aggregate_comparison: AggregateComparison,
}

/// Average one group.
///
/// Playlists without a popularity or audio-feature value are left out of
/// that particular mean; an empty group yields `None` everywhere.
pub fn group_averages(playlists: &[PlaylistMetrics], options: CompareOptions) -> GroupAverages {
    let with_features: Vec<AudioFeatureAverages> = playlists
        .iter()
        .filter_map(|p| p.audio_feature_averages)
        .collect();

    GroupAverages {
        followers: mean(playlists.iter().map(|p| p.follower_count as f64)),
        popularity: mean_present(playlists.iter().map(|p| p.average_popularity)),
        audio_features: group_audio_features(&with_features, options),
    }
}

fn group_audio_features(
    averages: &[AudioFeatureAverages],
    options: CompareOptions,
) -> Option<GroupAudioFeatures> {
    let field = |f: fn(&AudioFeatureAverages) -> f64| mean(averages.iter().map(f));
    let optional = |f: fn(&AudioFeatureAverages) -> f64| {
        if options.include_all_audio_features {
            field(f)
        } else {
            None
        }
    };

    Some(GroupAudioFeatures {
        danceability: field(|a| a.danceability)?,
        energy: field(|a| a.energy)?,
        valence: field(|a| a.valence)?,
        tempo: field(|a| a.tempo)?,
        acousticness: optional(|a| a.acousticness),
        instrumentalness: optional(|a| a.instrumentalness),
    })
}

/// Compare two groups with the default options.
pub fn compare(curated: Vec<PlaylistMetrics>, user: Vec<PlaylistMetrics>) -> ComparisonResult {
    compare_with(curated, user, CompareOptions::default())
}

/// Compare two groups. The input lists are returned unchanged.
pub fn compare_with(
    curated: Vec<PlaylistMetrics>,
    user: Vec<PlaylistMetrics>,
    options: CompareOptions,
) -> ComparisonResult {
    let curated_stats = group_averages(&curated, options);
    let user_stats = group_averages(&user, options);

    ComparisonResult {
        curated_playlists: curated,
        user_playlists: user,
        aggregate_comparison: AggregateComparison {
            average_followers: GroupPair {
                curated: curated_stats.followers,
                user: user_stats.followers,
            },
            average_track_popularity: GroupPair {
                curated: curated_stats.popularity,
                user: user_stats.popularity,
            },
            audio_features: GroupPair {
                curated: curated_stats.audio_features,
                user: user_stats.audio_features,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(
        id: &str,
        followers: u64,
        popularity: Option<f64>,
        danceability: Option<f64>,
    ) -> PlaylistMetrics {
        PlaylistMetrics {
            playlist_id: id.to_string(),
            playlist_name: id.to_uppercase(),
            is_curated: false,
            follower_count: followers,
            track_count: 10,
            fetched_track_count: 10,
            average_popularity: popularity,
            description_length: 0,
            last_updated: None,
            audio_feature_averages: danceability.map(|d| AudioFeatureAverages {
                danceability: d,
                energy: 0.5,
                valence: 0.4,
                tempo: 110.0,
                acousticness: 0.2,
                instrumentalness: 0.1,
            }),
            popularity_distribution: None,
            update_frequency_days: 0.0,
        }
    }

    #[test]
    fn test_compare_group_means() {
        let curated = vec![
            metrics("c1", 1_000_000, Some(80.0), Some(0.7)),
            metrics("c2", 3_000_000, Some(60.0), Some(0.5)),
        ];
        let user = vec![metrics("u1", 20_000, Some(40.0), Some(0.9))];

        let result = compare(curated.clone(), user.clone());
        let agg = &result.aggregate_comparison;

        assert_eq!(agg.average_followers.curated, Some(2_000_000.0));
        assert_eq!(agg.average_followers.user, Some(20_000.0));
        assert_eq!(agg.average_track_popularity.curated, Some(70.0));
        assert_eq!(agg.average_track_popularity.user, Some(40.0));

        let curated_af = agg.audio_features.curated.unwrap();
        assert!((curated_af.danceability - 0.6).abs() < 1e-9);
        assert_eq!(curated_af.tempo, 110.0);
        assert_eq!(curated_af.acousticness, None);
        assert_eq!(curated_af.instrumentalness, None);

        assert_eq!(result.curated_playlists, curated);
        assert_eq!(result.user_playlists, user);
    }

    #[test]
    fn test_compare_matches_mean_per_group() {
        let curated = vec![
            metrics("c1", 10, Some(1.0), None),
            metrics("c2", 30, Some(2.0), None),
        ];
        let user = vec![metrics("u1", 7, Some(3.0), None)];
        let result = compare(curated.clone(), user.clone());

        assert_eq!(
            result.aggregate_comparison.average_followers.curated,
            mean(curated.iter().map(|p| p.follower_count as f64))
        );
        assert_eq!(
            result.aggregate_comparison.average_followers.user,
            mean(user.iter().map(|p| p.follower_count as f64))
        );
    }

    #[test]
    fn test_compare_all_audio_features_option() {
        let curated = vec![metrics("c1", 1, Some(50.0), Some(0.5))];
        let options = CompareOptions {
            include_all_audio_features: true,
        };
        let result = compare_with(curated, Vec::new(), options);
        let af = result.aggregate_comparison.audio_features.curated.unwrap();
        assert_eq!(af.acousticness, Some(0.2));
        assert_eq!(af.instrumentalness, Some(0.1));
    }

    #[test]
    fn test_compare_empty_group_is_none() {
        let result = compare(vec![metrics("c1", 5, Some(10.0), None)], Vec::new());
        let agg = &result.aggregate_comparison;
        assert_eq!(agg.average_followers.user, None);
        assert_eq!(agg.average_track_popularity.user, None);
        assert_eq!(agg.audio_features.user, None);
        // No playlist in the curated group had features either.
        assert_eq!(agg.audio_features.curated, None);
    }

    #[test]
    fn test_group_averages_skip_missing_values() {
        let group = vec![
            metrics("a", 100, Some(90.0), Some(0.8)),
            metrics("b", 300, None, None),
        ];
        let averages = group_averages(&group, CompareOptions::default());
        assert_eq!(averages.followers, Some(200.0));
        assert_eq!(averages.popularity, Some(90.0));
        assert_eq!(averages.audio_features.map(|a| a.danceability), Some(0.8));
    }

    #[test]
    fn test_comparison_serializes_absent_values() {
        let result = compare(vec![metrics("c1", 5, Some(10.0), Some(0.5))], Vec::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["aggregate_comparison"]["average_followers"]["curated"],
            serde_json::json!(5.0)
        );
        assert!(json["aggregate_comparison"]["average_followers"]["user"].is_null());
        assert!(json["aggregate_comparison"]["audio_features"]["curated"]
            .get("acousticness")
            .is_none());
    }
}
