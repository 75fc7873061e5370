//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use chrono::{Datelike, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, EditorFocus, LoginFocus, Route};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    // Handle edit form overlay
    if matches!(app.state, AppState::Editing) {
        handle_edit_form_input(app, key);
        return Ok(false);
    }

    // Handle delete confirmation
    if matches!(app.state, AppState::ConfirmingDelete) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Normal;
                let target = match app.route {
                    Route::Editor(Some(id)) => Some(id),
                    _ => app.selected_playlist().map(|p| p.id),
                };
                if let Some(id) = target {
                    app.delete_playlist(id);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Global quit
    if key.code == KeyCode::Char('q') {
        app.state = AppState::Quitting;
        return Ok(true);
    }

    match app.route {
        Route::Login => handle_login_screen_input(app, key),
        Route::Dashboard => handle_dashboard_input(app, key),
        Route::Calendar => handle_calendar_input(app, key),
        Route::Editor(_) => handle_editor_input(app, key),
        Route::PublicPlaylist(_) => handle_public_input(app, key),
    }
    Ok(false)
}

/// Keys on the login screen when the overlay is closed.
fn handle_login_screen_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Quitting;
        }
        _ => app.show_login(),
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    let max_index = app.playlists.len().saturating_sub(1);
    match key.code {
        KeyCode::Up => {
            app.playlist_selection = app.playlist_selection.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.playlist_selection < max_index {
                app.playlist_selection += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(id) = app.selected_playlist().map(|p| p.id) {
                app.navigate(Route::Editor(Some(id)));
            }
        }
        KeyCode::Char('n') => {
            app.navigate(Route::Editor(None));
            if matches!(app.route, Route::Editor(None)) {
                app.open_new_playlist_form();
            }
        }
        KeyCode::Char('x') => match std::env::var("SPINDECK_IMPORT_FILE") {
            Ok(path) => app.import_xml_file(path.into()),
            Err(_) => {
                app.status_message =
                    Some("Set SPINDECK_IMPORT_FILE to the XML file to import".to_string());
            }
        },
        KeyCode::Char('d') => {
            if app.selected_playlist().is_some() {
                app.state = AppState::ConfirmingDelete;
            }
        }
        KeyCode::Char('c') => app.navigate(Route::Calendar),
        KeyCode::Char('r') => app.load_playlists(),
        KeyCode::Char('o') => app.logout(),
        _ => {}
    }
}

fn handle_calendar_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.shift_calendar_month(false),
        KeyCode::Right => app.shift_calendar_month(true),
        KeyCode::Char('t') => {
            let now = Utc::now();
            app.load_calendar(now.year(), now.month());
        }
        KeyCode::Esc => app.navigate(Route::Dashboard),
        KeyCode::Char('o') => app.logout(),
        _ => {}
    }
}

fn handle_editor_input(app: &mut App, key: KeyEvent) {
    let track_count = app
        .editor_playlist
        .as_ref()
        .map(|p| p.tracks.len())
        .unwrap_or(0);

    match key.code {
        KeyCode::Esc => app.navigate(Route::Dashboard),
        KeyCode::Tab => {
            app.editor_focus = match app.editor_focus {
                EditorFocus::Details => EditorFocus::Tracks,
                EditorFocus::Tracks => EditorFocus::Details,
            };
        }
        KeyCode::Up if app.editor_focus == EditorFocus::Tracks => {
            app.track_selection = app.track_selection.saturating_sub(1);
        }
        KeyCode::Down if app.editor_focus == EditorFocus::Tracks => {
            if app.track_selection + 1 < track_count {
                app.track_selection += 1;
            }
        }
        KeyCode::Char('a') if app.editor_focus == EditorFocus::Tracks => {
            app.add_track();
        }
        KeyCode::Char('+') | KeyCode::Char('=') if app.editor_focus == EditorFocus::Tracks => {
            app.nudge_bpm(5);
        }
        KeyCode::Char('-') if app.editor_focus == EditorFocus::Tracks => {
            app.nudge_bpm(-5);
        }
        KeyCode::Char('K') if app.editor_focus == EditorFocus::Tracks => {
            move_selected_track(app, -1);
        }
        KeyCode::Char('J') if app.editor_focus == EditorFocus::Tracks => {
            move_selected_track(app, 1);
        }
        KeyCode::Delete if app.editor_focus == EditorFocus::Tracks => {
            let target = app.editor_playlist.as_ref().and_then(|p| {
                p.tracks
                    .get(app.track_selection)
                    .map(|t| (p.id, t.id))
            });
            if let Some((playlist_id, track_id)) = target {
                app.delete_track(playlist_id, track_id);
            }
        }
        KeyCode::Char('e') => match app.editor_focus {
            EditorFocus::Details => app.open_playlist_form(),
            EditorFocus::Tracks => app.open_track_form(),
        },
        KeyCode::Char('p') => app.toggle_publish(),
        KeyCode::Char('d') => {
            if app.editor_playlist.is_some() {
                app.state = AppState::ConfirmingDelete;
            }
        }
        KeyCode::Char('o') => app.logout(),
        _ => {}
    }
}

fn handle_edit_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit_form(),
        KeyCode::Enter => {
            let on_save = app.edit_form.as_ref().is_some_and(|f| f.save_focused());
            if on_save {
                app.submit_edit_form();
            } else if let Some(form) = app.edit_form.as_mut() {
                form.focus += 1;
            }
        }
        KeyCode::Down | KeyCode::Tab => {
            if let Some(form) = app.edit_form.as_mut() {
                form.focus = (form.focus + 1) % (form.values.len() + 1);
            }
        }
        KeyCode::Up | KeyCode::BackTab => {
            if let Some(form) = app.edit_form.as_mut() {
                form.focus = form.focus.checked_sub(1).unwrap_or(form.values.len());
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.edit_form.as_mut() {
                if let Some(value) = form.values.get_mut(form.focus) {
                    value.pop();
                }
            }
        }
        KeyCode::Char(c) => {
            let can_add = app.can_add_form_char(c);
            if let Some(form) = app.edit_form.as_mut() {
                if can_add {
                    if let Some(value) = form.values.get_mut(form.focus) {
                        value.push(c);
                    }
                }
            }
        }
        _ => {}
    }
}

fn move_selected_track(app: &mut App, delta: i32) {
    let target = app.editor_playlist.as_ref().and_then(|p| {
        p.tracks
            .get(app.track_selection)
            .map(|t| (p.id, t.id, t.position + delta))
    });
    if let Some((playlist_id, track_id, new_position)) = target {
        if new_position >= 1 {
            app.reorder_track(playlist_id, track_id, new_position);
        }
    }
}

fn handle_public_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.navigate(Route::Dashboard);
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Email,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password => {
                app.login_focus = LoginFocus::Button;
            }
            LoginFocus::Button => {
                // On success the overlay closes and the deferred route loads;
                // on failure login_error is set on the form.
                app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if app.can_add_email_char(c) {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Password => {
                if app.can_add_password_char(c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}
