//! Session State
//!
//! - **Store**: the persisted user record under one fixed key
//! - **Context**: the in-process owner of the current session, with
//!   change notifications

mod context;
mod store;

pub use context::SessionContext;
pub use store::{
    FileStorage, MemoryStorage, SessionError, SessionResult, SessionStorage, SessionStore,
    SESSION_KEY,
};
