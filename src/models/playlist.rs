use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Track;

/// A spin-class playlist with its tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub class_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Total running time of the playlist in seconds.
    pub fn total_duration(&self) -> f64 {
        self.tracks.iter().filter_map(|t| t.duration).sum()
    }
}

/// Body for `POST /api/playlists/`.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub class_date: DateTime<Utc>,
}

/// Body for `PUT /api/playlists/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Aggregate counts shown on the dashboard header.
///
/// Computed client-side from the full playlist list rather than fetched,
/// matching the backend which has no stats endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_playlists: usize,
    pub published_playlists: usize,
    pub total_tracks: usize,
}

impl DashboardStats {
    pub fn from_playlists(playlists: &[Playlist]) -> Self {
        Self {
            total_playlists: playlists.len(),
            published_playlists: playlists.iter().filter(|p| p.is_published).count(),
            total_tracks: playlists.iter().map(|p| p.tracks.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_playlist(id: i64, published: bool, track_count: usize) -> Playlist {
        let track_json = r#"{
            "id": 1, "position": 1, "title": "T", "artist": "A",
            "album": null, "duration": 60.0, "bpm": null, "genre": null, "notes": null,
            "apple_music_url": null, "youtube_url": null, "spotify_url": null,
            "artwork_url": null, "release_year": null,
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let track: Track = serde_json::from_str(track_json).expect("parse track");
        Playlist {
            id,
            title: format!("Class {}", id),
            description: None,
            class_date: Utc::now(),
            is_published: published,
            created_by: 1,
            created_at: Utc::now(),
            updated_at: None,
            tracks: vec![track; track_count],
        }
    }

    #[test]
    fn test_parse_playlist_without_tracks_field() {
        let json = r#"{
            "id": 3, "title": "Tuesday Ride", "description": null,
            "class_date": "2024-03-05T18:00:00Z", "is_published": false,
            "created_by": 1, "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let playlist: Playlist = serde_json::from_str(json).expect("parse playlist");
        assert_eq!(playlist.id, 3);
        assert!(playlist.tracks.is_empty());
    }

    #[test]
    fn test_dashboard_stats_from_playlists() {
        let playlists = vec![
            sample_playlist(1, true, 3),
            sample_playlist(2, false, 2),
            sample_playlist(3, true, 0),
        ];
        let stats = DashboardStats::from_playlists(&playlists);
        assert_eq!(stats.total_playlists, 3);
        assert_eq!(stats.published_playlists, 2);
        assert_eq!(stats.total_tracks, 5);
    }

    #[test]
    fn test_dashboard_stats_empty() {
        assert_eq!(DashboardStats::from_playlists(&[]), DashboardStats::default());
    }

    #[test]
    fn test_total_duration_ignores_missing() {
        let mut playlist = sample_playlist(1, false, 2);
        playlist.tracks[1].duration = None;
        assert_eq!(playlist.total_duration(), 60.0);
    }

    #[test]
    fn test_playlist_update_publish_only() {
        let update = PlaylistUpdate {
            is_published: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"is_published":true}"#
        );
    }
}
