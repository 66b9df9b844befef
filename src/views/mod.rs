//! View Models
//!
//! Per-view local state and the flows each view runs against the API:
//!
//! - **home**: landing page with a featured selection
//! - **auth**: login and registration forms
//! - **movies**: catalog listing with search, category and sort
//! - **detail**: one movie, its reviews and the review form
//!
//! The state types are plain data so the browser frontend can drive them
//! from signals; the async flows take any [`MovieApi`] and the shared
//! [`SessionContext`].

pub mod auth;
pub mod detail;
pub mod home;
pub mod movies;

use crate::client::MovieApi;
use crate::error::{ClientError, ErrorTreatment};
use crate::guard::Route;
use crate::session::{SessionContext, SessionStorage};

/// Apply the sign-in treatment to `error`.
///
/// A session the server no longer accepts is dropped locally and the login
/// form comes next. Returns `None` for every other kind of error.
pub fn expire_session<S: SessionStorage>(ctx: &SessionContext<S>, error: &ClientError) -> Option<Route> {
    if error.treatment() != ErrorTreatment::SignIn {
        return None;
    }

    tracing::warn!("Session rejected by the server: {}", error);
    if let Err(e) = ctx.sign_out() {
        tracing::warn!("Failed to clear local session: {}", e);
    }
    Some(Route::Login)
}

/// End the session on the server, then locally.
///
/// The local session is cleared even when the server call fails. Returns the
/// route to show next.
pub async fn sign_out<A, S>(api: &A, ctx: &SessionContext<S>) -> Route
where
    A: MovieApi + ?Sized,
    S: SessionStorage,
{
    if let Err(e) = api.logout().await {
        tracing::warn!("Server logout failed: {}", e);
    }

    if let Err(e) = ctx.sign_out() {
        tracing::warn!("Failed to clear local session: {}", e);
    }

    Route::Home
}


#[cfg(test)]
mod tests {
    use super::testing::FakeApi;
    use super::*;
    use crate::error::ClientError;
    use crate::guard::{decide, Access};
    use crate::models::Session;
    use crate::session::{MemoryStorage, SessionStore};

    #[tokio::test]
    async fn test_sign_out_clears_session_and_goes_home() {
        let api = FakeApi::default();
        let ctx = SessionContext::new(SessionStore::new(MemoryStorage::new()));
        ctx.sign_in(Session::new("1", "Ana")).unwrap();

        let next = sign_out(&api, &ctx).await;

        assert_eq!(next, Route::Home);
        assert_eq!(api.calls(), vec!["logout"]);
        assert_eq!(ctx.store().load(), None);
        assert_eq!(
            decide(&Route::Movies, ctx.is_signed_in()),
            Access::Redirect(Route::Home)
        );
    }

    #[tokio::test]
    async fn test_sign_out_survives_server_failure() {
        let api = FakeApi {
            logout_error: Some(ClientError::Server {
                status: 500,
                message: String::new(),
            }),
            ..FakeApi::default()
        };
        let ctx = SessionContext::new(SessionStore::new(MemoryStorage::new()));
        ctx.sign_in(Session::new("1", "Ana")).unwrap();

        assert_eq!(sign_out(&api, &ctx).await, Route::Home);
        assert!(!ctx.is_signed_in());
    }

    #[test]
    fn test_expire_session_only_on_unauthorized() {
        let ctx = SessionContext::new(SessionStore::new(MemoryStorage::new()));
        ctx.sign_in(Session::new("1", "Ana")).unwrap();

        let outage = ClientError::Transport("connection refused".to_string());
        assert_eq!(expire_session(&ctx, &outage), None);
        assert!(ctx.is_signed_in());

        let rejected = ClientError::Unauthorized("Login To Continue".to_string());
        assert_eq!(expire_session(&ctx, &rejected), Some(Route::Login));
        assert!(!ctx.is_signed_in());
        assert_eq!(ctx.store().load(), None);
    }
}
