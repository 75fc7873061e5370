use chrono::{DateTime, Utc};

/// Format a track duration in seconds as m:ss
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) if secs >= 0.0 => {
            let total = secs.round() as i64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "-".to_string(),
    }
}

/// Format a class date for display, e.g. "Mar 05, 2024 6:00 PM"
pub fn format_class_date(date: &DateTime<Utc>) -> String {
    date.format("%b %d, %Y %l:%M %p").to_string()
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(245.0)), "4:05");
        assert_eq!(format_duration(Some(59.6)), "1:00");
        assert_eq!(format_duration(Some(0.0)), "0:00");
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(-3.0)), "-");
    }

    #[test]
    fn test_format_class_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap();
        assert_eq!(format_class_date(&date), "Mar 05, 2024  6:00 PM");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("x".to_string()), "-"), "x");
        assert_eq!(format_optional(&None, "-"), "-");
    }
}
