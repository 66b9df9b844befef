//! # MovieReviews
//!
//! Client core for the MovieReviews service: browse a movie catalog, read
//! reviews and post your own once logged in.
//!
//! ## Modules
//!
//! - [`session`]: the persisted logged-in user and the process-wide context
//! - [`guard`]: routes and the render/redirect policy
//! - [`catalog`]: search, category filtering and sorting of the listing
//! - [`views`]: per-view state and flows (home, auth, movies, detail)
//! - [`client`]: the [`MovieApi`] trait, endpoints and the native HTTP client
//! - [`fetch`], [`error`]: tagged request state and the error taxonomy
//!
//! The `native` feature (on by default) adds the reqwest client, config
//! files and the `movie-reviews` CLI. With it off the crate builds for
//! `wasm32` and backs the browser frontend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use movie_reviews::client::{HttpClient, HttpClientConfig};
//! use movie_reviews::session::{MemoryStorage, SessionContext, SessionStore};
//! use movie_reviews::views::auth::{self, AuthForm, Field};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new(HttpClientConfig::default())?;
//!     let ctx = SessionContext::new(SessionStore::new(MemoryStorage::new()));
//!
//!     let mut form = AuthForm::new();
//!     form.set_field(Field::UserId, "ana@example.com");
//!     form.set_field(Field::Password, "secret");
//!
//!     if let Some(next) = auth::submit(&api, &ctx, &mut form).await {
//!         println!("Logged in, continue at {}", next);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
#[cfg(feature = "native")]
pub mod config;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod models;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use catalog::{Category, MovieQuery, SortKey, CATEGORIES};
pub use client::{endpoints, MovieApi};
#[cfg(feature = "native")]
pub use client::{HttpClient, HttpClientConfig};
#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
pub use error::{ClientError, ClientResult, ErrorTreatment};
pub use fetch::FetchState;
pub use guard::{decide, resolve, Access, Route};
pub use models::{Movie, Review, Session};
pub use session::{SessionContext, SessionError, SessionStorage, SessionStore};
