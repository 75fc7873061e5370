use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// One class on the calendar, derived server-side from a playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub tracks_count: i64,
}

impl CalendarEvent {
    /// Day-of-month the event falls on, for placing it in the month grid.
    pub fn day(&self) -> u32 {
        self.start.day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_event() {
        let json = r#"{
            "id": 5, "title": "Morning Ride", "start": "2024-03-12T06:00:00Z",
            "end": "2024-03-12T06:00:00Z", "is_published": true, "tracks_count": 12
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).expect("parse event");
        assert_eq!(event.id, 5);
        assert_eq!(event.day(), 12);
        assert_eq!(event.tracks_count, 12);
    }

    #[test]
    fn test_parse_calendar_event_without_end() {
        let json = r#"{
            "id": 5, "title": "Ride", "start": "2024-03-12T06:00:00Z",
            "is_published": false, "tracks_count": 0
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).expect("parse event");
        assert!(event.end.is_none());
    }
}
