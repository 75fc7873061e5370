//! The route guard: decides whether a protected screen may render.
//!
//! The decision is recomputed on every navigation and on every session
//! state change; nothing here is cached across renders.

use super::SessionStore;

/// Outcome of a guard check for a protected screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restoration or login is still in flight; show a neutral
    /// pending indicator and make no navigation decision yet.
    Pending,
    /// Identity is set; render the requested screen.
    Allow,
    /// Resolved and anonymous; send the user to the login screen.
    RedirectToLogin,
}

/// Decide whether a protected screen may render right now.
///
/// `loading` wins over everything: no protected screen renders while the
/// session is unresolved, regardless of the identity value.
pub fn check(session: &SessionStore) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Pending
    } else if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::auth::TokenStore;
    use tempfile::tempdir;

    fn fresh_session() -> SessionStore {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        let api = ApiClient::new("http://localhost:0").expect("client");
        SessionStore::new(store, api)
    }

    #[test]
    fn test_pending_while_loading() {
        let session = fresh_session();
        assert!(session.is_loading());
        assert_eq!(check(&session), GuardDecision::Pending);
    }

    #[tokio::test]
    async fn test_redirect_once_resolved_anonymous() {
        let mut session = fresh_session();
        session.restore().await;
        assert_eq!(check(&session), GuardDecision::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_decision_is_recomputed_after_logout() {
        let mut session = fresh_session();
        session.restore().await;
        session.logout();
        assert_eq!(check(&session), GuardDecision::RedirectToLogin);
    }
}
