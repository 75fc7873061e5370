//! Authentication core: session state and route guarding.
//!
//! This module provides:
//! - `SessionStore`: single source of truth for who, if anyone, is logged
//!   in, plus the bearer-token attachment on the API client
//! - `TokenStore`: the one durable key (`token`) surviving restarts
//! - `guard`: the allow/redirect decision consulted before every
//!   protected screen
//! - `CredentialStore`: OS-keychain password storage used to prefill the
//!   login form

pub mod credentials;
pub mod guard;
pub mod session;
pub mod token_store;

pub use credentials::CredentialStore;
pub use guard::GuardDecision;
pub use session::{LoginOutcome, SessionStore};
pub use token_store::TokenStore;
