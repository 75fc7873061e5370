//! The session store: single source of truth for the authenticated
//! identity and the bearer-token attachment.
//!
//! One instance exists per process, owned by the `App` and mutated only
//! by `restore`, `login`, and `logout`. The durable token outlives the
//! process and seeds the next run's `restore`.

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::models::Admin;

use super::TokenStore;

/// Result of a login attempt, returned to the caller rather than thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl LoginOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

pub struct SessionStore {
    store: TokenStore,
    api: ApiClient,
    identity: Option<Admin>,
    loading: bool,
    /// Bumped whenever the session is replaced or cleared. In-flight work
    /// tagged with an older generation must discard its result.
    generation: u64,
}

impl SessionStore {
    /// Create the session in its pre-restore state: `loading` stays true
    /// until `restore` resolves, so the guard defers until then.
    pub fn new(store: TokenStore, api: ApiClient) -> Self {
        Self {
            store,
            api,
            identity: None,
            loading: true,
            generation: 0,
        }
    }

    /// The API client carrying the current credential attachment.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn identity(&self) -> Option<&Admin> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Restore the session from durable storage, once at startup.
    ///
    /// Any failure (missing token, rejected token, network error) resolves
    /// to the anonymous state without surfacing an error; the user simply
    /// lands on the login screen. `loading` drops exactly once, at the end.
    pub async fn restore(&mut self) {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored token, starting anonymous");
                self.loading = false;
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored token, starting anonymous");
                self.loading = false;
                return;
            }
        };

        self.api.set_token(token);
        match self.api.fetch_me().await {
            Ok(admin) => {
                info!(email = %admin.email, "Session restored");
                self.identity = Some(admin);
            }
            Err(e) => {
                // Invalid token and transient network failure are treated
                // alike: clear everything, no retry.
                debug!(error = %e, "Stored token rejected, clearing session");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to remove stored token");
                }
                self.api.clear_token();
            }
        }
        self.loading = false;
    }

    /// Authenticate and populate the identity.
    ///
    /// Failures come back as a `LoginOutcome` with a message from the
    /// backend's `detail` payload; neither the identity nor the stored
    /// token is left mutated by a failed attempt.
    pub async fn login(&mut self, email: &str, password: &str) -> LoginOutcome {
        self.loading = true;
        let outcome = self.login_inner(email, password).await;
        self.loading = false;
        outcome
    }

    async fn login_inner(&mut self, email: &str, password: &str) -> LoginOutcome {
        let token = match self.api.login(email, password).await {
            Ok(response) => response.access_token,
            Err(e) => {
                debug!(error = %e, "Login rejected");
                return LoginOutcome::failure(e.user_message());
            }
        };

        // Snapshot whatever this attempt is about to overwrite. A login
        // over an existing session that fails must put it back, not
        // leave the session with an identity and no token.
        let prior_token = match self.store.load() {
            Ok(prior) => prior,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token before replacing it");
                None
            }
        };

        if let Err(e) = self.store.save(&token) {
            warn!(error = %e, "Failed to persist token");
            return LoginOutcome::failure(format!("Could not save session: {}", e));
        }
        self.api.set_token(token);

        match self.api.fetch_me().await {
            Ok(admin) => {
                info!(email = %admin.email, "Login succeeded");
                self.identity = Some(admin);
                self.generation += 1;
                LoginOutcome::ok()
            }
            Err(e) => {
                debug!(error = %e, "Identity fetch after login failed, rolling back");
                self.restore_prior_token(prior_token);
                LoginOutcome::failure(e.user_message())
            }
        }
    }

    /// Undo a token swap so durable storage and the attachment match the
    /// state from before the failed attempt.
    fn restore_prior_token(&mut self, prior: Option<String>) {
        match prior {
            Some(prev) => {
                if let Err(e) = self.store.save(&prev) {
                    warn!(error = %e, "Failed to restore previous token");
                }
                self.api.set_token(prev);
            }
            None => {
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to remove stored token during rollback");
                }
                self.api.clear_token();
            }
        }
    }

    /// Drop the session. Synchronous and infallible from the caller's
    /// point of view; storage errors are logged and swallowed.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to remove stored token");
        }
        self.api.clear_token();
        self.identity = None;
        self.generation += 1;
        info!("Logged out");
    }
}
