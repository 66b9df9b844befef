//! Global Application State
//!
//! Reactive state management using Leptos signals. The session itself is
//! owned by the core [`SessionContext`]; `session` mirrors it so guards and
//! views re-render when someone signs in or out.

use leptos::*;

use movie_reviews::error::ClientError;
use movie_reviews::guard::Route;
use movie_reviews::models::Session;
use movie_reviews::session::{SessionContext, SessionStore};
use movie_reviews::views;

use super::session::LocalStorage;
use crate::api::BrowserApi;

/// Global application state provided to all components
#[derive(Clone)]
pub struct AppState {
    pub api: BrowserApi,
    pub ctx: SessionContext<LocalStorage>,
    /// Mirror of the current session
    pub session: RwSignal<Option<Session>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_app_state() {
    let ctx = SessionContext::new(SessionStore::new(LocalStorage));
    let session = create_rw_signal(ctx.current());

    let mut changes = ctx.subscribe();
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let current = changes.borrow_and_update().clone();
            session.set(current);
        }
    });

    provide_context(AppState {
        api: BrowserApi::from_storage(),
        ctx,
        session,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    });
}

impl AppState {
    /// Tracked: re-runs the caller when the session changes
    pub fn is_signed_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn user_name(&self) -> Option<String> {
        self.session.with(|s| s.as_ref().map(|s| s.name.clone()))
    }

    pub fn sign_in(&self, user: Session) {
        if let Err(e) = self.ctx.sign_in(user) {
            web_sys::console::error_1(&format!("Session not saved: {}", e).into());
            self.show_error("Could not remember your login in this browser");
        }
        self.sync();
    }

    /// Drop a session the server rejected; returns the login route to go to
    pub fn expire_session(&self, error: &ClientError) -> Option<Route> {
        let next = views::expire_session(&self.ctx, error)?;
        self.sync();
        Some(next)
    }

    /// Copy the context's session into the signal without waiting for the
    /// change notification
    pub fn sync(&self) {
        self.session.set(self.ctx.current());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
