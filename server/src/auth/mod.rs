//! Session credentials and the application-wide authentication latch.

pub mod auth_state;
pub mod session;

pub use auth_state::{AuthStateManager, AuthenticationState};
pub use session::{SESSION_COOKIE_NAME, SessionCredentials};
