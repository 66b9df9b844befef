//! State Management
//!
//! The shared session context bridged into Leptos signals, plus toasts.

pub mod global;
pub mod session;

pub use global::{provide_app_state, AppState};
pub use session::LocalStorage;
