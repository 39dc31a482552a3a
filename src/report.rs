//! Console rendering of comparison results.

use std::fmt;

use crate::analysis::{ComparisonResult, GroupAudioFeatures, PlaylistMetrics};

/// Placeholder for values that could not be computed.
const NOT_AVAILABLE: &str = "n/a";

/// Group an integer with thousands separators: `1234567` -> `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Follower mean rounded to the nearest whole follower.
fn format_followers(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => format_thousands(v.round() as u64),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn format_decimal(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn write_audio_features(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    features: Option<&GroupAudioFeatures>,
) -> fmt::Result {
    writeln!(f, "{}:", label)?;
    let Some(features) = features else {
        return writeln!(f, "  {}", NOT_AVAILABLE);
    };
    writeln!(f, "  Danceability: {:.3}", features.danceability)?;
    writeln!(f, "  Energy: {:.3}", features.energy)?;
    writeln!(f, "  Valence: {:.3}", features.valence)?;
    writeln!(f, "  Tempo: {:.1} BPM", features.tempo)?;
    if let Some(a) = features.acousticness {
        writeln!(f, "  Acousticness: {:.3}", a)?;
    }
    if let Some(i) = features.instrumentalness {
        writeln!(f, "  Instrumentalness: {:.3}", i)?;
    }
    Ok(())
}

/// Per-playlist summary block.
pub struct PlaylistReport<'a>(pub &'a PlaylistMetrics);

impl fmt::Display for PlaylistReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metrics = self.0;
        writeln!(f, "{}:", metrics.playlist_name)?;
        writeln!(f, "Followers: {}", format_thousands(metrics.follower_count))?;
        writeln!(
            f,
            "Tracks: {} fetched of {} declared",
            metrics.fetched_track_count, metrics.track_count
        )?;
        writeln!(
            f,
            "Average Popularity: {}",
            format_decimal(metrics.average_popularity)
        )?;
        if let Some(dist) = &metrics.popularity_distribution {
            writeln!(
                f,
                "Popularity Mix: {:.1}% high / {:.1}% medium / {:.1}% low",
                dist.high, dist.medium, dist.low
            )?;
        }
        writeln!(
            f,
            "Last Updated: {}",
            metrics
                .last_updated
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        )?;
        writeln!(
            f,
            "Update Frequency: {:.2} days",
            metrics.update_frequency_days
        )
    }
}

/// Full comparison report: group statistics followed by every playlist.
pub struct ComparisonReport<'a>(pub &'a ComparisonResult);

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let agg = &result.aggregate_comparison;

        writeln!(f, "=== Comparison Results ===\n")?;

        writeln!(f, "Curated Playlists Stats:")?;
        writeln!(
            f,
            "Average Followers: {}",
            format_followers(agg.average_followers.curated)
        )?;
        writeln!(
            f,
            "Average Track Popularity: {}",
            format_decimal(agg.average_track_popularity.curated)
        )?;

        writeln!(f, "\nUser Playlists Stats:")?;
        writeln!(
            f,
            "Average Followers: {}",
            format_followers(agg.average_followers.user)
        )?;
        writeln!(
            f,
            "Average Track Popularity: {}",
            format_decimal(agg.average_track_popularity.user)
        )?;

        writeln!(f, "\nAudio Features Comparison:")?;
        write_audio_features(f, "Curated Playlists", agg.audio_features.curated.as_ref())?;
        write_audio_features(f, "User Playlists", agg.audio_features.user.as_ref())?;

        writeln!(f, "\n=== Individual Playlist Details ===")?;
        for (label, playlists) in [
            ("Curated Playlists", &result.curated_playlists),
            ("User Playlists", &result.user_playlists),
        ] {
            writeln!(f, "\n{}:", label)?;
            if playlists.is_empty() {
                writeln!(f, "  none")?;
            }
            for metrics in playlists {
                writeln!(f)?;
                write!(f, "{}", PlaylistReport(metrics))?;
            }
        }
        Ok(())
    }
}

/// Render the per-playlist summary block.
pub fn render_playlist(metrics: &PlaylistMetrics) -> String {
    PlaylistReport(metrics).to_string()
}

/// Render the full comparison report.
pub fn render_comparison(result: &ComparisonResult) -> String {
    ComparisonReport(result).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare, PopularityDistribution};
    use chrono::{TimeZone, Utc};

    fn metrics(name: &str, followers: u64) -> PlaylistMetrics {
        PlaylistMetrics {
            playlist_id: name.to_lowercase(),
            playlist_name: name.to_string(),
            is_curated: true,
            follower_count: followers,
            track_count: 50,
            fetched_track_count: 49,
            average_popularity: Some(72.456),
            description_length: 12,
            last_updated: Some(Utc.with_ymd_and_hms(2024, 6, 7, 4, 0, 0).unwrap()),
            audio_feature_averages: None,
            popularity_distribution: Some(PopularityDistribution {
                high: 50.0,
                medium: 25.0,
                low: 25.0,
            }),
            update_frequency_days: 1.234,
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(34_567_890), "34,567,890");
    }

    #[test]
    fn test_render_playlist() {
        let text = render_playlist(&metrics("Today's Top Hits", 34_000_000));
        assert!(text.contains("Today's Top Hits:"));
        assert!(text.contains("Followers: 34,000,000"));
        assert!(text.contains("Tracks: 49 fetched of 50 declared"));
        assert!(text.contains("Average Popularity: 72.46"));
        assert!(text.contains("Last Updated: 2024-06-07"));
        assert!(text.contains("Update Frequency: 1.23 days"));
    }

    #[test]
    fn test_render_comparison_with_empty_user_group() {
        let result = compare(vec![metrics("RapCaviar", 15_000_001)], Vec::new());
        let text = render_comparison(&result);
        assert!(text.contains("Average Followers: 15,000,001"));
        assert!(text.contains("User Playlists Stats:\nAverage Followers: n/a"));
        assert!(text.contains("RapCaviar:"));
        assert!(text.contains("User Playlists:\n  none"));
    }

    #[test]
    fn test_comparison_report_display_matches_render() {
        let result = compare(
            vec![metrics("RapCaviar", 15_000_001)],
            vec![metrics("Gym Mix", 20_000)],
        );
        let text = format!("{}", ComparisonReport(&result));
        assert_eq!(text, render_comparison(&result));
        assert!(text.starts_with("=== Comparison Results ===\n\nCurated Playlists Stats:\n"));
        assert!(text.contains("Curated Playlists:\n  n/a\n"));
        // Playlist blocks are separated by a blank line and end with a newline.
        assert!(text.contains("Curated Playlists:\n\nRapCaviar:\n"));
        assert!(text.ends_with("Update Frequency: 1.23 days\n"));
    }
}
