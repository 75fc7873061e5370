use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A track within a playlist, ordered by `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub position: i32,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    pub bpm: Option<i32>,
    pub genre: Option<String>,
    pub notes: Option<String>,
    pub apple_music_url: Option<String>,
    pub youtube_url: Option<String>,
    pub spotify_url: Option<String>,
    pub artwork_url: Option<String>,
    pub release_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/tracks/playlist/{playlist_id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackCreate {
    pub position: i32,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_music_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
}

/// Body for `PUT /api/tracks/{track_id}`.
///
/// Only set fields are serialized, matching the backend's partial-update
/// semantics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_minimal() {
        let json = r#"{
            "id": 7, "position": 1, "title": "Opening Climb", "artist": "DJ Cadence",
            "album": null, "duration": 245.0, "bpm": 128, "genre": null, "notes": null,
            "apple_music_url": null, "youtube_url": null, "spotify_url": null,
            "artwork_url": null, "release_year": null,
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let track: Track = serde_json::from_str(json).expect("parse track");
        assert_eq!(track.id, 7);
        assert_eq!(track.position, 1);
        assert_eq!(track.bpm, Some(128));
        assert!(track.updated_at.is_none());
    }

    #[test]
    fn test_track_update_skips_unset_fields() {
        let update = TrackUpdate {
            position: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).expect("serialize update");
        assert_eq!(json, r#"{"position":3}"#);
    }

    #[test]
    fn test_track_create_serializes_required_fields() {
        let create = TrackCreate {
            position: 1,
            title: "Sprint".to_string(),
            artist: "Pulse".to_string(),
            bpm: Some(140),
            ..Default::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&create).unwrap()).unwrap();
        assert_eq!(value["position"], 1);
        assert_eq!(value["title"], "Sprint");
        assert_eq!(value["bpm"], 140);
        assert!(value.get("album").is_none());
    }
}
