//! Data models for the playlist service.
//!
//! This module contains all the data structures exchanged with the
//! backend, mirrored from its JSON schemas:
//!
//! - `Admin`: the authenticated identity
//! - `Playlist`, `PlaylistCreate`, `PlaylistUpdate`: playlist CRUD payloads
//! - `Track`, `TrackCreate`, `TrackUpdate`: track CRUD payloads
//! - `CalendarEvent`: one class on the calendar
//! - `ImportReport`: result of an XML playlist import
//! - `DashboardStats`: client-side aggregate over the playlist list

pub mod admin;
pub mod calendar;
pub mod import;
pub mod playlist;
pub mod track;

pub use admin::{Admin, TokenResponse};
pub use calendar::CalendarEvent;
pub use import::ImportReport;
pub use playlist::{DashboardStats, Playlist, PlaylistCreate, PlaylistUpdate};
pub use track::{Track, TrackCreate, TrackUpdate};
