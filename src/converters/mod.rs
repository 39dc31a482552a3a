//! JSON to model converters.
//!
//! This module provides functions to convert raw Spotify Web API JSON
//! responses into typed model structures. The API is loose about nulls
//! (removed tracks, local files, missing analyses, unset descriptions), so
//! conversion is tolerant and only fails when an identifying field is
//! missing.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Result, SpotifyError};
use crate::models::{
    common::{Image, Owner, Page},
    playlist::{Playlist, PlaylistItem, SimplifiedPlaylist},
    track::{ArtistRef, AudioFeatures, Track},
};

/// Get string from JSON, returning empty string if not found or null.
fn get_str(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Get a required non-empty string.
fn get_required_str(json: &Value, key: &str, what: &str) -> Result<String> {
    json.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| SpotifyError::NoData(format!("Missing {} {}", what, key)))
}

/// Get u32 from JSON.
fn get_u32(json: &Value, key: &str) -> u32 {
    json.get(key).and_then(|v| v.as_u64()).unwrap_or(0) as u32
}

/// Get u64 from JSON.
fn get_u64(json: &Value, key: &str) -> u64 {
    json.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
}

/// Get i32 from JSON.
fn get_i32(json: &Value, key: &str) -> i32 {
    json.get(key).and_then(|v| v.as_i64()).unwrap_or(0) as i32
}

/// Get f64 from JSON.
fn get_f64(json: &Value, key: &str) -> f64 {
    json.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Get bool from JSON.
fn get_bool(json: &Value, key: &str) -> bool {
    json.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Get an RFC 3339 timestamp from JSON.
fn get_datetime(json: &Value, key: &str) -> Option<DateTime<Utc>> {
    json.get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Extract images from an `images` array. `null` yields no images.
pub fn extract_images(json: &Value) -> Vec<Image> {
    json.get("images")
        .and_then(|i| i.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|img| {
                    let url = img.get("url").and_then(|u| u.as_str())?;
                    let height = img.get("height").and_then(|h| h.as_u64()).map(|h| h as u32);
                    let width = img.get("width").and_then(|w| w.as_u64()).map(|w| w as u32);
                    Some(Image::new(url, height, width))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a playlist owner.
fn parse_owner(json: &Value) -> Owner {
    Owner {
        id: get_str(json, "id"),
        display_name: json
            .get("display_name")
            .and_then(|d| d.as_str())
            .map(|s| s.to_string()),
    }
}

/// Parse a track from raw JSON.
///
/// Local files have a `null` id and are kept with an empty id.
pub fn parse_track(json: &Value) -> Result<Track> {
    if !json.is_object() {
        return Err(SpotifyError::NoData("Track is not an object".to_string()));
    }

    let artists = json
        .get("artists")
        .and_then(|a| a.as_array())
        .map(|arr| {
            arr.iter()
                .map(|artist| ArtistRef::new(get_str(artist, "id"), get_str(artist, "name")))
                .collect()
        })
        .unwrap_or_default();

    Ok(Track {
        id: get_str(json, "id"),
        name: get_str(json, "name"),
        popularity: get_u32(json, "popularity"),
        duration_ms: get_u64(json, "duration_ms"),
        explicit: get_bool(json, "explicit"),
        artists,
    })
}

/// Parse one playlist entry.
///
/// Returns `None` when the track is gone (`"track": null`) or the
/// `added_at` timestamp is missing.
pub fn parse_playlist_item(json: &Value) -> Option<PlaylistItem> {
    let track_json = json.get("track").filter(|t| !t.is_null())?;
    let added_at = get_datetime(json, "added_at")?;
    let track = parse_track(track_json).ok()?;
    Some(PlaylistItem::new(track, added_at))
}

/// Parse a page of playlist entries.
///
/// Unusable entries stay in the page as `None` so callers can tell a short
/// page from a page with skipped entries.
pub fn parse_playlist_items_page(json: &Value) -> Result<Page<Option<PlaylistItem>>> {
    let items = json
        .get("items")
        .and_then(|i| i.as_array())
        .ok_or_else(|| SpotifyError::NoData("No playlist items".to_string()))?;

    Ok(Page {
        items: items.iter().map(parse_playlist_item).collect(),
        total: get_u32(json, "total"),
        limit: get_u32(json, "limit"),
        offset: get_u32(json, "offset"),
        next: json
            .get("next")
            .and_then(|n| n.as_str())
            .map(|s| s.to_string()),
    })
}

/// Parse the audio features of one track. `null` yields `None`.
pub fn parse_audio_features(json: &Value) -> Option<AudioFeatures> {
    if !json.is_object() {
        return None;
    }
    let id = json.get("id").and_then(|v| v.as_str())?;

    Some(AudioFeatures {
        id: id.to_string(),
        danceability: get_f64(json, "danceability"),
        energy: get_f64(json, "energy"),
        valence: get_f64(json, "valence"),
        tempo: get_f64(json, "tempo"),
        acousticness: get_f64(json, "acousticness"),
        instrumentalness: get_f64(json, "instrumentalness"),
        key: get_i32(json, "key"),
        loudness: get_f64(json, "loudness"),
        mode: get_i32(json, "mode"),
        speechiness: get_f64(json, "speechiness"),
        liveness: get_f64(json, "liveness"),
        duration_ms: get_u64(json, "duration_ms"),
        time_signature: get_u32(json, "time_signature"),
    })
}

/// Parse an `/audio-features` response, preserving `null` entries.
pub fn parse_audio_features_response(json: &Value) -> Result<Vec<Option<AudioFeatures>>> {
    let features = json
        .get("audio_features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| SpotifyError::NoData("No audio_features array".to_string()))?;

    Ok(features.iter().map(parse_audio_features).collect())
}

/// Parse a full playlist from raw JSON.
///
/// Only the first page of entries is embedded in the playlist object;
/// the API client replaces `items` with the fully paginated list.
pub fn parse_playlist(json: &Value) -> Result<Playlist> {
    let id = get_required_str(json, "id", "playlist")?;
    let tracks = json.get("tracks").unwrap_or(&Value::Null);

    let items = tracks
        .get("items")
        .and_then(|i| i.as_array())
        .map(|arr| arr.iter().filter_map(parse_playlist_item).collect())
        .unwrap_or_default();

    Ok(Playlist {
        id,
        name: get_str(json, "name"),
        description: get_str(json, "description"),
        followers: json
            .get("followers")
            .map(|f| get_u64(f, "total"))
            .unwrap_or(0),
        owner: parse_owner(json.get("owner").unwrap_or(&Value::Null)),
        total_tracks: get_u32(tracks, "total"),
        items,
        images: extract_images(json),
        public: json.get("public").and_then(|p| p.as_bool()),
        collaborative: get_bool(json, "collaborative"),
        snapshot_id: get_str(json, "snapshot_id"),
    })
}

/// Parse a playlist as returned by search or browse. `null` yields `None`.
pub fn parse_simplified_playlist(json: &Value) -> Option<SimplifiedPlaylist> {
    let id = get_required_str(json, "id", "playlist").ok()?;

    Some(SimplifiedPlaylist {
        id,
        name: get_str(json, "name"),
        description: get_str(json, "description"),
        owner: parse_owner(json.get("owner").unwrap_or(&Value::Null)),
        total_tracks: json
            .get("tracks")
            .map(|t| get_u32(t, "total"))
            .unwrap_or(0),
    })
}

/// Parse a `{"playlists": {...page...}}` listing from search or browse.
pub fn parse_playlist_listing(json: &Value) -> Result<Page<SimplifiedPlaylist>> {
    let page = json
        .get("playlists")
        .ok_or_else(|| SpotifyError::NoData("No playlists listing".to_string()))?;

    let items = page
        .get("items")
        .and_then(|i| i.as_array())
        .map(|arr| arr.iter().filter_map(parse_simplified_playlist).collect())
        .unwrap_or_default();

    Ok(Page {
        items,
        total: get_u32(page, "total"),
        limit: get_u32(page, "limit"),
        offset: get_u32(page, "offset"),
        next: page
            .get("next")
            .and_then(|n| n.as_str())
            .map(|s| s.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn track_json(id: &str, popularity: u32) -> Value {
        json!({
            "id": id,
            "name": format!("Track {}", id),
            "popularity": popularity,
            "duration_ms": 201000,
            "explicit": true,
            "artists": [{ "id": "art1", "name": "Test Artist" }]
        })
    }

    #[test]
    fn test_parse_track() {
        let track = parse_track(&track_json("t1", 88)).unwrap();
        assert_eq!(track.id, "t1");
        assert_eq!(track.name, "Track t1");
        assert_eq!(track.popularity, 88);
        assert_eq!(track.duration_ms, 201000);
        assert!(track.explicit);
        assert_eq!(track.artists[0].name, "Test Artist");
    }

    #[test]
    fn test_parse_local_track_has_empty_id() {
        let json = json!({
            "id": null,
            "name": "home recording",
            "popularity": 0,
            "duration_ms": 1000,
            "is_local": true,
            "artists": []
        });
        let track = parse_track(&json).unwrap();
        assert_eq!(track.id, "");
        assert_eq!(track.name, "home recording");
    }

    #[test]
    fn test_parse_playlist_item_null_track() {
        let json = json!({ "added_at": "2024-05-01T10:00:00Z", "track": null });
        assert!(parse_playlist_item(&json).is_none());
    }

    #[test]
    fn test_parse_playlist_item() {
        let json = json!({ "added_at": "2024-05-01T10:00:00Z", "track": track_json("t1", 50) });
        let item = parse_playlist_item(&json).unwrap();
        assert_eq!(
            item.added_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(item.track.id, "t1");
    }

    #[test]
    fn test_parse_playlist_items_page_keeps_skipped_slots() {
        let json = json!({
            "items": [
                { "added_at": "2024-05-01T10:00:00Z", "track": track_json("t1", 50) },
                { "added_at": "2024-05-02T10:00:00Z", "track": null }
            ],
            "total": 2,
            "limit": 100,
            "offset": 0,
            "next": null
        });
        let page = parse_playlist_items_page(&json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].is_some());
        assert!(page.items[1].is_none());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_parse_audio_features_response_preserves_nulls() {
        let json = json!({
            "audio_features": [
                {
                    "id": "t1", "danceability": 0.5, "energy": 0.8, "valence": 0.6,
                    "tempo": 120.0, "acousticness": 0.3, "instrumentalness": 0.0,
                    "key": 5, "loudness": -6.2, "mode": 1, "speechiness": 0.04,
                    "liveness": 0.1, "duration_ms": 201000, "time_signature": 4
                },
                null
            ]
        });
        let features = parse_audio_features_response(&json).unwrap();
        assert_eq!(features.len(), 2);
        let first = features[0].as_ref().unwrap();
        assert_eq!(first.id, "t1");
        assert_eq!(first.tempo, 120.0);
        assert_eq!(first.loudness, -6.2);
        assert!(features[1].is_none());
    }

    #[test]
    fn test_parse_playlist() {
        let json = json!({
            "id": "37i9dQZF1DXcBWIGoYBM5M",
            "name": "Today's Top Hits",
            "description": "The hottest 50.",
            "followers": { "href": null, "total": 34000000 },
            "owner": { "id": "spotify", "display_name": "Spotify" },
            "images": [{ "url": "https://i.scdn.co/image/a", "height": null, "width": null }],
            "public": true,
            "collaborative": false,
            "snapshot_id": "snap",
            "tracks": {
                "total": 50,
                "items": [
                    { "added_at": "2024-05-03T00:00:00Z", "track": track_json("t1", 90) },
                    { "added_at": "2024-05-01T00:00:00Z", "track": null }
                ]
            }
        });

        let playlist = parse_playlist(&json).unwrap();
        assert_eq!(playlist.id, "37i9dQZF1DXcBWIGoYBM5M");
        assert_eq!(playlist.followers, 34000000);
        assert_eq!(playlist.total_tracks, 50);
        assert_eq!(playlist.items.len(), 1);
        assert!(playlist.owner.is_platform());
        assert_eq!(playlist.images[0].height, None);
        assert_eq!(playlist.public, Some(true));
    }

    #[test]
    fn test_parse_playlist_null_description() {
        let json = json!({
            "id": "p1",
            "name": "Mine",
            "description": null,
            "owner": { "id": "someone" },
            "tracks": { "total": 0, "items": [] }
        });
        let playlist = parse_playlist(&json).unwrap();
        assert_eq!(playlist.description, "");
        assert_eq!(playlist.followers, 0);
    }

    #[test]
    fn test_parse_playlist_missing_id() {
        let json = json!({ "name": "No id" });
        assert!(parse_playlist(&json).is_err());
    }

    #[test]
    fn test_parse_playlist_listing_skips_null_entries() {
        let json = json!({
            "playlists": {
                "items": [
                    null,
                    {
                        "id": "p2",
                        "name": "Best of",
                        "description": "",
                        "owner": { "id": "listener", "display_name": "A Listener" },
                        "tracks": { "total": 80 }
                    }
                ],
                "total": 1000,
                "limit": 10,
                "offset": 0,
                "next": "https://api.spotify.com/v1/search?offset=10"
            }
        });
        let page = parse_playlist_listing(&json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p2");
        assert_eq!(page.items[0].total_tracks, 80);
        assert_eq!(page.total, 1000);
    }
}
