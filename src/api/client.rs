//! HTTP client for the playlist backend.
//!
//! All endpoint paths mirror the backend's FastAPI routers exactly.

use chrono::NaiveDate;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{
    Admin, CalendarEvent, ImportReport, Playlist, PlaylistCreate, PlaylistUpdate, TokenResponse,
    Track, TrackCreate, TrackUpdate,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// The backend is small; anything slower than this is effectively down.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// API client for the playlist backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Attach a bearer token; every subsequent request carries it.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Remove the bearer token entirely. Requests made after this carry
    /// no `Authorization` header at all.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidResponse(format!("Invalid token value: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, turning an error body into a typed error.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "Request rejected by backend");
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad JSON from {}: {}", url, e)))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad JSON from {}: {}", url, e)))
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad JSON from {}: {}", url, e)))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(path))
            .headers(self.auth_headers()?)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Auth =====

    /// `POST /api/auth/login` with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        // No auth header here - this is the one call made while anonymous.
        let url = self.url("/api/auth/login");
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad JSON from {}: {}", url, e)))
    }

    /// `GET /api/auth/me`, validating the currently attached token.
    pub async fn fetch_me(&self) -> Result<Admin, ApiError> {
        self.get("/api/auth/me").await
    }

    // ===== Playlists =====

    pub async fn fetch_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        self.get("/api/playlists/").await
    }

    pub async fn fetch_playlist(&self, id: i64) -> Result<Playlist, ApiError> {
        self.get(&format!("/api/playlists/{}", id)).await
    }

    pub async fn create_playlist(&self, data: &PlaylistCreate) -> Result<Playlist, ApiError> {
        self.post("/api/playlists/", data).await
    }

    pub async fn update_playlist(
        &self,
        id: i64,
        data: &PlaylistUpdate,
    ) -> Result<Playlist, ApiError> {
        self.put(&format!("/api/playlists/{}", id), data).await
    }

    pub async fn delete_playlist(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/playlists/{}", id)).await
    }

    /// Fetch a published playlist without authentication.
    pub async fn fetch_public_playlist(&self, id: i64) -> Result<Playlist, ApiError> {
        self.get(&format!("/api/playlists/public/{}", id)).await
    }

    /// Upload an XML playlist export for server-side parsing and import.
    pub async fn import_xml(
        &self,
        file_name: &str,
        content: Vec<u8>,
        class_date: Option<NaiveDate>,
    ) -> Result<ImportReport, ApiError> {
        let part = reqwest::multipart::Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("text/xml")
            .map_err(|e| ApiError::InvalidResponse(format!("Bad multipart body: {}", e)))?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(date) = class_date {
            form = form.text("class_date", date.to_string());
        }

        let url = self.url("/api/playlists/import-xml");
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Bad JSON from {}: {}", url, e)))
    }

    // ===== Tracks =====

    pub async fn create_track(
        &self,
        playlist_id: i64,
        data: &TrackCreate,
    ) -> Result<Track, ApiError> {
        self.post(&format!("/api/tracks/playlist/{}", playlist_id), data)
            .await
    }

    pub async fn update_track(&self, track_id: i64, data: &TrackUpdate) -> Result<Track, ApiError> {
        self.put(&format!("/api/tracks/{}", track_id), data).await
    }

    pub async fn delete_track(&self, track_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/tracks/{}", track_id)).await
    }

    /// Move a track to a new position; the backend shifts its neighbors.
    pub async fn reorder_track(&self, track_id: i64, new_position: i32) -> Result<(), ApiError> {
        let path = format!("/api/tracks/{}/reorder?new_position={}", track_id, new_position);
        let response = self
            .client
            .post(self.url(&path))
            .headers(self.auth_headers()?)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Calendar =====

    pub async fn fetch_month_events(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        self.get(&format!("/api/calendar/month/{}/{}", year, month))
            .await
    }
}
