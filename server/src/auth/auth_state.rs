use crate::api::ApiError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Authentication status of the whole application.
///
/// The transition into [`AuthenticationState::Required`] is one-way for the
/// lifetime of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthenticationState {
    /// Requests are being accepted by the backend
    #[default]
    Active,
    /// The backend rejected the session; the app shows a full-screen message
    Required {
        /// User-facing explanation
        message: String,
    },
}

/// Shared authentication latch.
///
/// Cloning is cheap and every clone observes the same state. Concurrent
/// authentication failures produce exactly one transition: the first writer
/// wins and the rest see the latch already set.
///
/// # Examples
///
/// ```no_run
/// use server::auth::AuthStateManager;
///
/// # async fn run() {
/// let auth = AuthStateManager::new();
/// if auth.mark_authentication_required("session expired").await {
///     // first failure: notify the user once
/// }
/// assert!(auth.is_authentication_required().await);
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct AuthStateManager {
    inner: Arc<RwLock<AuthenticationState>>,
}

impl AuthStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_state(&self) -> AuthenticationState {
        self.inner.read().await.clone()
    }

    pub async fn is_authentication_required(&self) -> bool {
        matches!(
            *self.inner.read().await,
            AuthenticationState::Required { .. }
        )
    }

    /// Latches the authentication-required state.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub async fn mark_authentication_required(&self, message: impl Into<String>) -> bool {
        let mut state = self.inner.write().await;
        if matches!(*state, AuthenticationState::Required { .. }) {
            return false;
        }
        let message = message.into();
        log::warn!("Authentication required: {message}");
        *state = AuthenticationState::Required { message };
        true
    }

    /// Latches the state if `result` failed with an authentication error.
    ///
    /// Returns `true` when this call performed the transition.
    pub async fn observe<T>(&self, result: &Result<T, ApiError>) -> bool {
        match result {
            Err(error @ ApiError::Authentication { .. }) => {
                self.mark_authentication_required(error.to_string()).await
            }
            _ => false,
        }
    }
}
