//! Application state management for spindeck.
//!
//! This module contains the core `App` struct that owns the session
//! store, navigation state, loaded data, and background task
//! coordination. All navigation to protected screens funnels through the
//! route guard.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::auth::{guard, CredentialStore, GuardDecision, SessionStore, TokenStore};
use crate::config::Config;
use crate::models::{
    CalendarEvent, DashboardStats, ImportReport, Playlist, PlaylistCreate, PlaylistUpdate,
    TrackCreate, TrackUpdate,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A screen load is at most a couple of requests; 32 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for an edit form field.
const MAX_FIELD_LENGTH: usize = 200;

/// Input/display format for class dates in edit forms.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

const PLAYLIST_FORM_LABELS: &[&str] = &["Title", "Description", "Date"];
const TRACK_FORM_LABELS: &[&str] = &["Title", "Artist", "Album", "Genre"];

// ============================================================================
// Navigation
// ============================================================================

/// The screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Calendar,
    /// `None` edits a brand-new playlist; `Some(id)` edits an existing one.
    Editor(Option<i64>),
    /// Read-only view of a published playlist; no login required.
    PublicPlaylist(i64),
}

impl Route {
    /// Whether this screen sits behind the route guard.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::PublicPlaylist(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Dashboard => "Dashboard",
            Route::Calendar => "Calendar",
            Route::Editor(_) => "Playlist",
            Route::PublicPlaylist(_) => "Playlist",
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    LoggingIn,
    Editing,
    ConfirmingDelete,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

/// Current focus within the editor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Details,
    Tracks,
}

/// What an open edit form writes to when submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    NewPlaylist,
    Playlist(i64),
    Track { playlist_id: i64, track_id: i64 },
}

/// A modal form over a handful of text fields, driven like the login
/// form: Tab cycles fields, Enter on Save submits, Esc cancels.
#[derive(Debug)]
pub struct EditForm {
    pub heading: &'static str,
    pub labels: &'static [&'static str],
    pub values: Vec<String>,
    /// Index into `values`; one past the end is the Save button.
    pub focus: usize,
    pub error: Option<String>,
    pub target: EditTarget,
}

impl EditForm {
    pub fn save_focused(&self) -> bool {
        self.focus == self.values.len()
    }
}

/// Title, optional description, and parsed class date from the playlist
/// form fields.
fn parse_playlist_fields(
    values: &[String],
) -> Result<(String, Option<String>, DateTime<Utc>), String> {
    let title = values[0].trim().to_string();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    let class_date = NaiveDateTime::parse_from_str(values[2].trim(), DATE_INPUT_FORMAT)
        .map_err(|_| "Date must look like 2024-03-05 18:00".to_string())?
        .and_utc();
    Ok((title, non_empty(&values[1]), class_date))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Payloads sent back from spawned fetch tasks.
enum FetchPayload {
    Playlists(Vec<Playlist>),
    PlaylistDetail(Playlist),
    CalendarEvents(i32, u32, Vec<CalendarEvent>),
    PublicPlaylist(Playlist),
    Imported(ImportReport),
    PlaylistDeleted(i64),
    Error(String),
}

/// A fetch result tagged with the session generation it was spawned
/// under. Results from a superseded session are dropped on receipt.
struct FetchResult {
    generation: u64,
    payload: FetchPayload,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: SessionStore,

    // Navigation
    pub state: AppState,
    pub route: Route,
    /// A protected route requested while the session was still loading.
    pending_route: Option<Route>,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Dashboard data
    pub playlists: Vec<Playlist>,
    pub stats: DashboardStats,
    pub playlist_selection: usize,

    // Calendar data
    pub calendar_year: i32,
    pub calendar_month: u32,
    pub calendar_events: Vec<CalendarEvent>,

    // Editor data
    pub editor_playlist: Option<Playlist>,
    pub editor_focus: EditorFocus,
    pub track_selection: usize,
    pub edit_form: Option<EditForm>,

    // Public view data
    pub public_playlist: Option<Playlist>,

    // Background task channel
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance from the on-disk config.
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let token_dir = Config::token_dir().unwrap_or_else(|_| PathBuf::from("."));
        let api = ApiClient::new(config.resolved_api_url())
            .map_err(|e| anyhow::anyhow!("Failed to build API client: {}", e))?;
        let session = SessionStore::new(TokenStore::new(token_dir), api);

        Ok(Self::with_parts(config, session))
    }

    /// Assemble an app around pre-built services. `new()` and the tests
    /// both go through here.
    pub fn with_parts(config: Config, session: SessionStore) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login_email = std::env::var("SPINDECK_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let login_password = std::env::var("SPINDECK_PASSWORD")
            .ok()
            .or_else(|| {
                if login_email.is_empty() {
                    None
                } else {
                    CredentialStore::get_password(&login_email).ok()
                }
            })
            .unwrap_or_default();

        let now = Utc::now();

        Self {
            config,
            session,

            state: AppState::Normal,
            route: Route::Login,
            pending_route: None,

            login_focus: if login_email.is_empty() {
                LoginFocus::Email
            } else {
                LoginFocus::Password
            },
            login_email,
            login_password,
            login_error: None,

            playlists: Vec::new(),
            stats: DashboardStats::default(),
            playlist_selection: 0,

            calendar_year: now.year(),
            calendar_month: now.month(),
            calendar_events: Vec::new(),

            editor_playlist: None,
            editor_focus: EditorFocus::Details,
            track_selection: 0,
            edit_form: None,

            public_playlist: None,

            fetch_rx: rx,
            fetch_tx: tx,

            status_message: None,
        }
    }

    // =========================================================================
    // Session & navigation
    // =========================================================================

    /// Restore the session from durable storage and land on the first
    /// screen: the dashboard when authenticated, the login screen
    /// otherwise.
    pub async fn start(&mut self) {
        self.session.restore().await;
        self.navigate(Route::Dashboard);
    }

    /// Request a screen. Protected screens are gated by the route guard;
    /// the guard decision is recomputed on every call, never cached.
    pub fn navigate(&mut self, route: Route) {
        if !route.is_protected() {
            debug!(?route, "Navigating to public route");
            self.route = route;
            self.on_route_entered();
            return;
        }

        match guard::check(&self.session) {
            GuardDecision::Pending => {
                debug!(?route, "Session still loading, deferring navigation");
                self.pending_route = Some(route);
            }
            GuardDecision::Allow => {
                debug!(?route, "Guard allowed navigation");
                self.route = route;
                self.on_route_entered();
            }
            GuardDecision::RedirectToLogin => {
                debug!(?route, "Guard redirected to login");
                self.pending_route = Some(route);
                self.route = Route::Login;
                self.show_login();
            }
        }
    }

    /// Re-run any navigation that was deferred while the session loaded.
    pub fn resolve_pending_navigation(&mut self) {
        if let Some(route) = self.pending_route.take() {
            self.navigate(route);
        }
    }

    fn on_route_entered(&mut self) {
        match self.route {
            Route::Dashboard => self.load_playlists(),
            Route::Calendar => self.load_calendar(self.calendar_year, self.calendar_month),
            Route::Editor(Some(id)) => self.load_playlist(id),
            Route::Editor(None) => {
                self.editor_playlist = None;
                self.editor_focus = EditorFocus::Details;
                self.track_selection = 0;
            }
            Route::PublicPlaylist(id) => self.load_public_playlist(id),
            Route::Login => {}
        }
    }

    /// Show the login overlay.
    pub fn show_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Attempt login with the credentials from the login form.
    pub async fn attempt_login(&mut self) {
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return;
        }
        self.login_error = None;

        let outcome = self.session.login(&email, &password).await;
        if outcome.success {
            if let Err(e) = CredentialStore::store(&email, &password) {
                warn!(error = %e, "Failed to store credentials");
            }
            self.config.last_email = Some(email);
            if let Err(e) = self.config.save() {
                warn!(error = %e, "Failed to save config");
            }

            self.login_password.clear();
            self.state = AppState::Normal;
            if self.pending_route.is_none() {
                self.pending_route = Some(Route::Dashboard);
            }
            self.resolve_pending_navigation();
        } else {
            self.login_error = outcome.error;
        }
    }

    /// Log out and land on the login screen.
    pub fn logout(&mut self) {
        self.session.logout();
        self.playlists.clear();
        self.stats = DashboardStats::default();
        self.calendar_events.clear();
        self.editor_playlist = None;
        self.edit_form = None;
        self.public_playlist = None;
        self.route = Route::Login;
        self.show_login();
    }

    // =========================================================================
    // Login form input
    // =========================================================================

    pub fn can_add_email_char(&self, c: char) -> bool {
        self.login_email.chars().count() < MAX_EMAIL_LENGTH && !c.is_control()
    }

    pub fn can_add_password_char(&self, c: char) -> bool {
        self.login_password.chars().count() < MAX_PASSWORD_LENGTH && !c.is_control()
    }

    // =========================================================================
    // Edit forms
    // =========================================================================

    /// Open a blank form for a playlist that does not exist yet.
    pub fn open_new_playlist_form(&mut self) {
        self.edit_form = Some(EditForm {
            heading: " New playlist ",
            labels: PLAYLIST_FORM_LABELS,
            values: vec![
                String::new(),
                String::new(),
                Utc::now().format(DATE_INPUT_FORMAT).to_string(),
            ],
            focus: 0,
            error: None,
            target: EditTarget::NewPlaylist,
        });
        self.state = AppState::Editing;
    }

    /// Open the form prefilled from the playlist in the editor.
    pub fn open_playlist_form(&mut self) {
        let Some(ref playlist) = self.editor_playlist else {
            self.open_new_playlist_form();
            return;
        };
        self.edit_form = Some(EditForm {
            heading: " Edit playlist ",
            labels: PLAYLIST_FORM_LABELS,
            values: vec![
                playlist.title.clone(),
                playlist.description.clone().unwrap_or_default(),
                playlist.class_date.format(DATE_INPUT_FORMAT).to_string(),
            ],
            focus: 0,
            error: None,
            target: EditTarget::Playlist(playlist.id),
        });
        self.state = AppState::Editing;
    }

    /// Open the form prefilled from the selected track.
    pub fn open_track_form(&mut self) {
        let target = self.editor_playlist.as_ref().and_then(|p| {
            p.tracks
                .get(self.track_selection)
                .map(|t| (p.id, t.clone()))
        });
        let Some((playlist_id, track)) = target else {
            return;
        };
        self.edit_form = Some(EditForm {
            heading: " Edit track ",
            labels: TRACK_FORM_LABELS,
            values: vec![
                track.title,
                track.artist,
                track.album.unwrap_or_default(),
                track.genre.unwrap_or_default(),
            ],
            focus: 0,
            error: None,
            target: EditTarget::Track {
                playlist_id,
                track_id: track.id,
            },
        });
        self.state = AppState::Editing;
    }

    pub fn cancel_edit_form(&mut self) {
        self.edit_form = None;
        self.state = AppState::Normal;
    }

    /// Validate the open form and dispatch the create or update it
    /// describes. Validation failures keep the form open with a message.
    pub fn submit_edit_form(&mut self) {
        let Some(mut form) = self.edit_form.take() else {
            self.state = AppState::Normal;
            return;
        };

        let result = match form.target {
            EditTarget::NewPlaylist => parse_playlist_fields(&form.values).map(
                |(title, description, class_date)| {
                    self.create_playlist(PlaylistCreate {
                        title,
                        description,
                        class_date,
                    });
                },
            ),
            EditTarget::Playlist(id) => parse_playlist_fields(&form.values).map(
                |(title, description, class_date)| {
                    self.update_playlist(
                        id,
                        PlaylistUpdate {
                            title: Some(title),
                            description,
                            class_date: Some(class_date),
                            ..Default::default()
                        },
                    );
                },
            ),
            EditTarget::Track {
                playlist_id,
                track_id,
            } => {
                let title = form.values[0].trim().to_string();
                let artist = form.values[1].trim().to_string();
                if title.is_empty() || artist.is_empty() {
                    Err("Title and artist are required".to_string())
                } else {
                    self.update_track(
                        playlist_id,
                        track_id,
                        TrackUpdate {
                            title: Some(title),
                            artist: Some(artist),
                            album: non_empty(&form.values[2]),
                            genre: non_empty(&form.values[3]),
                            ..Default::default()
                        },
                    );
                    Ok(())
                }
            }
        };

        match result {
            Ok(()) => self.state = AppState::Normal,
            Err(message) => {
                form.error = Some(message);
                self.edit_form = Some(form);
            }
        }
    }

    pub fn can_add_form_char(&self, c: char) -> bool {
        match self.edit_form {
            Some(ref form) if form.focus < form.values.len() => {
                form.values[form.focus].chars().count() < MAX_FIELD_LENGTH && !c.is_control()
            }
            _ => false,
        }
    }

    // =========================================================================
    // Background data loading
    // =========================================================================

    fn spawn_fetch<F>(&self, fut: F)
    where
        F: std::future::Future<Output = Result<FetchPayload, crate::api::ApiError>>
            + Send
            + 'static,
    {
        let tx = self.fetch_tx.clone();
        let generation = self.session.generation();
        tokio::spawn(async move {
            let payload = match fut.await {
                Ok(payload) => payload,
                Err(e) => FetchPayload::Error(e.user_message()),
            };
            if let Err(e) = tx.send(FetchResult { generation, payload }).await {
                warn!(error = %e, "Failed to send fetch result - channel closed");
            }
        });
    }

    pub fn load_playlists(&mut self) {
        let api = self.session.api().clone();
        self.spawn_fetch(async move { api.fetch_playlists().await.map(FetchPayload::Playlists) });
    }

    pub fn load_playlist(&mut self, id: i64) {
        let api = self.session.api().clone();
        self.spawn_fetch(async move {
            api.fetch_playlist(id).await.map(FetchPayload::PlaylistDetail)
        });
    }

    pub fn load_calendar(&mut self, year: i32, month: u32) {
        self.calendar_year = year;
        self.calendar_month = month;
        let api = self.session.api().clone();
        self.spawn_fetch(async move {
            api.fetch_month_events(year, month)
                .await
                .map(|events| FetchPayload::CalendarEvents(year, month, events))
        });
    }

    pub fn load_public_playlist(&mut self, id: i64) {
        let api = self.session.api().clone();
        self.spawn_fetch(async move {
            api.fetch_public_playlist(id)
                .await
                .map(FetchPayload::PublicPlaylist)
        });
    }

    /// Move the calendar one month back or forward and reload it.
    pub fn shift_calendar_month(&mut self, forward: bool) {
        let (mut year, mut month) = (self.calendar_year, self.calendar_month);
        if forward {
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        } else if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
        self.load_calendar(year, month);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn create_playlist(&mut self, data: PlaylistCreate) {
        let api = self.session.api().clone();
        self.status_message = Some("Creating playlist...".to_string());
        self.spawn_fetch(async move {
            api.create_playlist(&data).await.map(FetchPayload::PlaylistDetail)
        });
    }

    pub fn update_playlist(&mut self, id: i64, data: PlaylistUpdate) {
        let api = self.session.api().clone();
        self.status_message = Some("Saving...".to_string());
        self.spawn_fetch(async move {
            api.update_playlist(id, &data)
                .await
                .map(FetchPayload::PlaylistDetail)
        });
    }

    /// Flip the published flag on the playlist open in the editor.
    pub fn toggle_publish(&mut self) {
        if let Some(ref playlist) = self.editor_playlist {
            let update = PlaylistUpdate {
                is_published: Some(!playlist.is_published),
                ..Default::default()
            };
            self.update_playlist(playlist.id, update);
        }
    }

    pub fn delete_playlist(&mut self, id: i64) {
        let api = self.session.api().clone();
        self.status_message = Some("Deleting...".to_string());
        self.spawn_fetch(async move {
            api.delete_playlist(id)
                .await
                .map(|_| FetchPayload::PlaylistDeleted(id))
        });
    }

    /// Append a placeholder track to the playlist open in the editor.
    pub fn add_track(&mut self) {
        let target = self
            .editor_playlist
            .as_ref()
            .map(|p| (p.id, p.tracks.len() as i32 + 1));
        if let Some((playlist_id, position)) = target {
            let api = self.session.api().clone();
            self.spawn_fetch(async move {
                let data = TrackCreate {
                    position,
                    title: "New track".to_string(),
                    artist: "Unknown".to_string(),
                    ..Default::default()
                };
                api.create_track(playlist_id, &data).await?;
                api.fetch_playlist(playlist_id)
                    .await
                    .map(FetchPayload::PlaylistDetail)
            });
        }
    }

    /// Adjust the BPM of the selected track by `delta`, starting from a
    /// typical spin cadence when unset.
    pub fn nudge_bpm(&mut self, delta: i32) {
        let target = self.editor_playlist.as_ref().and_then(|p| {
            p.tracks
                .get(self.track_selection)
                .map(|t| (p.id, t.id, t.bpm.unwrap_or(120) + delta))
        });
        if let Some((playlist_id, track_id, bpm)) = target {
            if bpm > 0 {
                let update = TrackUpdate {
                    bpm: Some(bpm),
                    ..Default::default()
                };
                self.update_track(playlist_id, track_id, update);
            }
        }
    }

    pub fn delete_track(&mut self, playlist_id: i64, track_id: i64) {
        let api = self.session.api().clone();
        self.spawn_fetch(async move {
            api.delete_track(track_id).await?;
            api.fetch_playlist(playlist_id)
                .await
                .map(FetchPayload::PlaylistDetail)
        });
    }

    /// Move a track and refresh the playlist so the new ordering shows.
    pub fn reorder_track(&mut self, playlist_id: i64, track_id: i64, new_position: i32) {
        let api = self.session.api().clone();
        self.spawn_fetch(async move {
            api.reorder_track(track_id, new_position).await?;
            api.fetch_playlist(playlist_id)
                .await
                .map(FetchPayload::PlaylistDetail)
        });
    }

    pub fn update_track(&mut self, playlist_id: i64, track_id: i64, data: TrackUpdate) {
        let api = self.session.api().clone();
        self.spawn_fetch(async move {
            api.update_track(track_id, &data).await?;
            api.fetch_playlist(playlist_id)
                .await
                .map(FetchPayload::PlaylistDetail)
        });
    }

    /// Upload an XML playlist export for server-side import.
    pub fn import_xml_file(&mut self, path: PathBuf) {
        let api = self.session.api().clone();
        self.status_message = Some("Importing...".to_string());
        self.spawn_fetch(async move {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "playlist.xml".to_string());
            let content = tokio::fs::read(&path).await.map_err(|e| {
                crate::api::ApiError::InvalidResponse(format!(
                    "Could not read {}: {}",
                    path.display(),
                    e
                ))
            })?;
            api.import_xml(&file_name, content, None)
                .await
                .map(FetchPayload::Imported)
        });
    }

    // =========================================================================
    // Background task processing
    // =========================================================================

    /// Drain completed background tasks and apply their results.
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.fetch_rx.try_recv() {
            self.process_fetch_result(result);
        }
    }

    fn process_fetch_result(&mut self, result: FetchResult) {
        // A login or logout happened after this task was spawned; its
        // result belongs to a session that no longer exists.
        if result.generation != self.session.generation() {
            debug!(
                spawned = result.generation,
                current = self.session.generation(),
                "Dropping fetch result from superseded session"
            );
            return;
        }

        match result.payload {
            FetchPayload::Playlists(playlists) => {
                self.stats = DashboardStats::from_playlists(&playlists);
                self.playlists = playlists;
                if self.playlist_selection >= self.playlists.len() {
                    self.playlist_selection = self.playlists.len().saturating_sub(1);
                }
            }
            FetchPayload::PlaylistDetail(playlist) => {
                info!(id = playlist.id, "Playlist loaded");
                if let Some(existing) = self.playlists.iter_mut().find(|p| p.id == playlist.id) {
                    *existing = playlist.clone();
                }
                // Only the editor consumes detail results. A refetch that
                // finishes after the user left stays a list update and
                // must not drag them back in.
                if matches!(self.route, Route::Editor(_)) {
                    self.route = Route::Editor(Some(playlist.id));
                    self.editor_playlist = Some(playlist);
                    if self.status_message.as_deref() == Some("Saving...")
                        || self.status_message.as_deref() == Some("Creating playlist...")
                    {
                        self.status_message = Some("Saved".to_string());
                    }
                }
            }
            FetchPayload::CalendarEvents(year, month, events) => {
                // The user may have paged to another month meanwhile.
                if year == self.calendar_year && month == self.calendar_month {
                    self.calendar_events = events;
                }
            }
            FetchPayload::PublicPlaylist(playlist) => {
                self.public_playlist = Some(playlist);
            }
            FetchPayload::Imported(report) => {
                if report.success {
                    self.status_message = Some(report.message);
                    if let Some(id) = report.playlist_id {
                        self.navigate(Route::Editor(Some(id)));
                    }
                } else {
                    self.status_message = Some(format!("Import failed: {}", report.message));
                }
            }
            FetchPayload::PlaylistDeleted(id) => {
                self.playlists.retain(|p| p.id != id);
                self.stats = DashboardStats::from_playlists(&self.playlists);
                if self
                    .editor_playlist
                    .as_ref()
                    .is_some_and(|p| p.id == id)
                {
                    self.editor_playlist = None;
                    self.navigate(Route::Dashboard);
                }
                self.status_message = Some("Playlist deleted".to_string());
            }
            FetchPayload::Error(message) => {
                warn!(error = %message, "Background task failed");
                self.status_message = Some(message);
            }
        }
    }

    /// Currently selected playlist on the dashboard, if any.
    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.playlist_selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_app() -> App {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        let api = ApiClient::new("http://localhost:0").expect("client");
        App::with_parts(Config::default(), SessionStore::new(store, api))
    }

    fn sample_playlist(id: i64) -> Playlist {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": format!("Class {}", id), "description": null,
            "class_date": "2024-03-05T18:00:00Z", "is_published": false,
            "created_by": 1, "created_at": "2024-03-01T12:00:00Z", "tracks": []
        }))
        .expect("playlist")
    }

    // -------------------------------------------------------------------------
    // Route Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_route_protection() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::Calendar.is_protected());
        assert!(Route::Editor(None).is_protected());
        assert!(Route::Editor(Some(3)).is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::PublicPlaylist(3).is_protected());
    }

    // -------------------------------------------------------------------------
    // Navigation Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_protected_navigation_defers_while_session_loads() {
        let mut app = test_app();
        assert!(app.session.is_loading());

        app.navigate(Route::Dashboard);

        // No decision yet: still on the login screen with the request parked.
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.pending_route, Some(Route::Dashboard));
    }

    #[tokio::test]
    async fn test_anonymous_session_redirects_to_login() {
        let mut app = test_app();
        // Restore resolves anonymous against the unreachable test URL.
        app.start().await;

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.state, AppState::LoggingIn);
    }

    #[tokio::test]
    async fn test_public_route_bypasses_guard() {
        let mut app = test_app();
        assert!(app.session.is_loading());

        app.navigate(Route::PublicPlaylist(7));

        assert_eq!(app.route, Route::PublicPlaylist(7));
    }

    #[tokio::test]
    async fn test_login_with_empty_fields_sets_error() {
        let mut app = test_app();
        app.session.restore().await;
        app.login_email.clear();
        app.login_password.clear();

        app.attempt_login().await;

        assert_eq!(
            app.login_error.as_deref(),
            Some("Email and password required")
        );
    }

    // -------------------------------------------------------------------------
    // Background result liveness
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_stale_generation_results_are_dropped() {
        let mut app = test_app();
        app.session.restore().await;

        let stale = FetchResult {
            generation: app.session.generation() + 1,
            payload: FetchPayload::Playlists(vec![sample_playlist(1)]),
        };
        app.process_fetch_result(stale);
        assert!(app.playlists.is_empty());

        let live = FetchResult {
            generation: app.session.generation(),
            payload: FetchPayload::Playlists(vec![sample_playlist(1)]),
        };
        app.process_fetch_result(live);
        assert_eq!(app.playlists.len(), 1);
    }

    #[tokio::test]
    async fn test_playlists_result_updates_stats() {
        let mut app = test_app();
        app.session.restore().await;

        let mut published = sample_playlist(2);
        published.is_published = true;
        let result = FetchResult {
            generation: app.session.generation(),
            payload: FetchPayload::Playlists(vec![sample_playlist(1), published]),
        };
        app.process_fetch_result(result);

        assert_eq!(app.stats.total_playlists, 2);
        assert_eq!(app.stats.published_playlists, 1);
    }

    #[tokio::test]
    async fn test_deleted_playlist_is_removed_from_list() {
        let mut app = test_app();
        app.session.restore().await;
        app.playlists = vec![sample_playlist(1), sample_playlist(2)];

        let result = FetchResult {
            generation: app.session.generation(),
            payload: FetchPayload::PlaylistDeleted(1),
        };
        app.process_fetch_result(result);

        assert_eq!(app.playlists.len(), 1);
        assert_eq!(app.playlists[0].id, 2);
    }

    #[tokio::test]
    async fn test_calendar_result_for_old_month_is_ignored() {
        let mut app = test_app();
        app.session.restore().await;
        app.calendar_year = 2024;
        app.calendar_month = 4;

        let event: CalendarEvent = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "Ride", "start": "2024-03-12T06:00:00Z",
            "is_published": true, "tracks_count": 10
        }))
        .expect("event");
        let result = FetchResult {
            generation: app.session.generation(),
            payload: FetchPayload::CalendarEvents(2024, 3, vec![event]),
        };
        app.process_fetch_result(result);

        assert!(app.calendar_events.is_empty());
    }

    #[tokio::test]
    async fn test_detail_result_off_editor_updates_list_only() {
        let mut app = test_app();
        app.session.restore().await;
        app.playlists = vec![sample_playlist(1)];
        app.route = Route::Calendar;

        let mut updated = sample_playlist(1);
        updated.title = "Renamed".to_string();
        let result = FetchResult {
            generation: app.session.generation(),
            payload: FetchPayload::PlaylistDetail(updated),
        };
        app.process_fetch_result(result);

        // A late refetch must not pull the user out of the calendar.
        assert_eq!(app.route, Route::Calendar);
        assert!(app.editor_playlist.is_none());
        assert_eq!(app.playlists[0].title, "Renamed");
    }

    #[tokio::test]
    async fn test_detail_result_lands_in_open_editor() {
        let mut app = test_app();
        app.session.restore().await;
        app.route = Route::Editor(Some(1));

        let result = FetchResult {
            generation: app.session.generation(),
            payload: FetchPayload::PlaylistDetail(sample_playlist(1)),
        };
        app.process_fetch_result(result);

        assert_eq!(app.route, Route::Editor(Some(1)));
        assert!(app.editor_playlist.is_some());
    }

    // -------------------------------------------------------------------------
    // Edit forms
    // -------------------------------------------------------------------------

    fn sample_playlist_with_track(id: i64) -> Playlist {
        let mut playlist = sample_playlist(id);
        playlist.tracks = vec![serde_json::from_value(serde_json::json!({
            "id": 7, "position": 1, "title": "Climb", "artist": "DJ Ride",
            "album": "Peaks", "duration": 240.0, "bpm": 90, "genre": null,
            "notes": null, "apple_music_url": null, "youtube_url": null,
            "spotify_url": null, "artwork_url": null, "release_year": null,
            "created_at": "2024-03-01T12:00:00Z"
        }))
        .expect("track")];
        playlist
    }

    #[test]
    fn test_parse_playlist_fields() {
        let values = vec![
            "  Morning Ride ".to_string(),
            "".to_string(),
            "2024-03-05 18:00".to_string(),
        ];
        let (title, description, class_date) =
            parse_playlist_fields(&values).expect("valid fields");
        assert_eq!(title, "Morning Ride");
        assert!(description.is_none());
        assert_eq!(class_date.format(DATE_INPUT_FORMAT).to_string(), "2024-03-05 18:00");

        let blank = vec!["".to_string(), "".to_string(), "2024-03-05 18:00".to_string()];
        assert!(parse_playlist_fields(&blank).is_err());
    }

    #[test]
    fn test_new_playlist_form_requires_title() {
        let mut app = test_app();
        app.open_new_playlist_form();
        assert_eq!(app.state, AppState::Editing);

        app.submit_edit_form();

        // The form stays open with the validation message.
        assert_eq!(app.state, AppState::Editing);
        let form = app.edit_form.as_ref().expect("form still open");
        assert!(form.error.is_some());
    }

    #[test]
    fn test_playlist_form_prefills_from_editor() {
        let mut app = test_app();
        app.editor_playlist = Some(sample_playlist(4));
        app.open_playlist_form();

        let form = app.edit_form.as_ref().expect("form open");
        assert_eq!(form.target, EditTarget::Playlist(4));
        assert_eq!(form.values[0], "Class 4");
        assert_eq!(form.values[2], "2024-03-05 18:00");
    }

    #[test]
    fn test_playlist_form_rejects_bad_date() {
        let mut app = test_app();
        app.editor_playlist = Some(sample_playlist(4));
        app.open_playlist_form();
        if let Some(form) = app.edit_form.as_mut() {
            form.values[2] = "yesterday".to_string();
        }

        app.submit_edit_form();

        assert_eq!(app.state, AppState::Editing);
        let form = app.edit_form.as_ref().expect("form still open");
        assert_eq!(
            form.error.as_deref(),
            Some("Date must look like 2024-03-05 18:00")
        );
    }

    #[tokio::test]
    async fn test_submitting_playlist_form_closes_it() {
        let mut app = test_app();
        app.session.restore().await;
        app.editor_playlist = Some(sample_playlist(4));
        app.open_playlist_form();
        if let Some(form) = app.edit_form.as_mut() {
            form.values[0] = "Renamed".to_string();
        }

        app.submit_edit_form();

        assert_eq!(app.state, AppState::Normal);
        assert!(app.edit_form.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Saving..."));
    }

    #[tokio::test]
    async fn test_track_form_prefills_and_requires_artist() {
        let mut app = test_app();
        app.session.restore().await;
        app.editor_playlist = Some(sample_playlist_with_track(4));
        app.open_track_form();

        let form = app.edit_form.as_ref().expect("form open");
        assert_eq!(
            form.target,
            EditTarget::Track {
                playlist_id: 4,
                track_id: 7
            }
        );
        assert_eq!(form.values[0], "Climb");
        assert_eq!(form.values[1], "DJ Ride");
        assert_eq!(form.values[3], "");

        if let Some(form) = app.edit_form.as_mut() {
            form.values[1].clear();
        }
        app.submit_edit_form();

        assert_eq!(app.state, AppState::Editing);
        let form = app.edit_form.as_ref().expect("form still open");
        assert_eq!(form.error.as_deref(), Some("Title and artist are required"));
    }

    #[test]
    fn test_track_form_needs_a_selected_track() {
        let mut app = test_app();
        app.editor_playlist = Some(sample_playlist(4));
        app.open_track_form();

        assert!(app.edit_form.is_none());
        assert_eq!(app.state, AppState::Normal);
    }

    // -------------------------------------------------------------------------
    // Input validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_email_char() {
        let mut app = test_app();
        assert!(app.can_add_email_char('a'));
        assert!(!app.can_add_email_char('\n'));
        app.login_email = "x".repeat(MAX_EMAIL_LENGTH);
        assert!(!app.can_add_email_char('a'));
    }

    #[test]
    fn test_can_add_password_char() {
        let mut app = test_app();
        assert!(app.can_add_password_char('!'));
        assert!(!app.can_add_password_char('\x00'));
        app.login_password = "x".repeat(MAX_PASSWORD_LENGTH);
        assert!(!app.can_add_password_char('a'));
    }

    #[tokio::test]
    async fn test_shift_calendar_month_wraps_year() {
        let mut app = test_app();
        app.calendar_year = 2024;
        app.calendar_month = 12;
        app.shift_calendar_month(true);
        assert_eq!((app.calendar_year, app.calendar_month), (2025, 1));

        app.calendar_year = 2024;
        app.calendar_month = 1;
        app.shift_calendar_month(false);
        assert_eq!((app.calendar_year, app.calendar_month), (2023, 12));
    }
}
