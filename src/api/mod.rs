//! REST API client for the playlist backend.
//!
//! This module provides the `ApiClient` for authenticating and for
//! fetching and editing playlists, tracks, and calendar data.
//!
//! The backend uses JWT bearer token authentication; the client attaches
//! the `Authorization` header at call time from the token it currently
//! holds, and sends no header at all when logged out.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
