use serde::Deserialize;

/// Result of `POST /api/playlists/import-xml`.
///
/// The backend reports partial success: `success` covers the playlist
/// creation, while per-track failures accumulate in `errors`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub playlist_id: Option<i64>,
    #[serde(default)]
    pub tracks_imported: i64,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_report_success() {
        let json = r#"{
            "success": true, "message": "Successfully imported 14 tracks",
            "playlist_id": 9, "tracks_imported": 14, "errors": []
        }"#;
        let report: ImportReport = serde_json::from_str(json).expect("parse report");
        assert!(report.success);
        assert_eq!(report.playlist_id, Some(9));
        assert_eq!(report.tracks_imported, 14);
    }

    #[test]
    fn test_parse_import_report_failure() {
        let json = r#"{"success": false, "message": "Import failed: bad xml"}"#;
        let report: ImportReport = serde_json::from_str(json).expect("parse report");
        assert!(!report.success);
        assert!(report.playlist_id.is_none());
        assert_eq!(report.tracks_imported, 0);
        assert!(report.errors.is_empty());
    }
}
