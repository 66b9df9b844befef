//! MovieReviews API Client
//!
//! The [`MovieApi`] trait every view talks to, the endpoint table shared by
//! the native and browser clients, and (with the `native` feature) the
//! reqwest-backed implementation.
//!
//! ## Endpoints
//!
//! - `GET  /api/movies/` - list all movies
//! - `GET  /api/movies/imdb/{id}` - one movie by IMDb id
//! - `POST /api/User/login` - log in, returns `{user}`
//! - `POST /api/User/signin` - create an account, returns `{user}`
//! - `GET  /api/User/logout` - end the cookie session
//! - `GET  /api/User/data` - current user from the session cookies
//! - `POST /api/review/` - add a review (cookie credentials)
//! - `POST /api/review/viewreview` - reviews of one movie

#[cfg(feature = "native")]
mod cookies;
#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use cookies::CookieFile;
#[cfg(feature = "native")]
pub use http::{HttpClient, HttpClientConfig};

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{LoginRequest, Movie, NewReview, Review, Session, SignupRequest};

/// Default API origin used by the original deployment
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Operations the views perform against the remote API
///
/// Browser futures are not `Send`, so on `wasm32` the trait is declared
/// with `async_trait(?Send)`.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait MovieApi: Send + Sync {
    /// Fetch the whole catalog
    async fn list_movies(&self) -> ClientResult<Vec<Movie>>;

    /// Fetch one movie by its external identifier
    async fn get_movie(&self, imdb_id: &str) -> ClientResult<Movie>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<Session>;

    /// Create an account; the server logs the new user in
    async fn signup(&self, request: &SignupRequest) -> ClientResult<Session>;

    async fn logout(&self) -> ClientResult<()>;

    /// Current user according to the server-side cookies
    async fn current_user(&self) -> ClientResult<Session>;

    async fn post_review(&self, review: &NewReview) -> ClientResult<()>;

    async fn list_reviews(&self, imdb_id: &str) -> ClientResult<Vec<Review>>;
}

/// Paths of the remote API, relative to its origin
pub mod endpoints {
    pub const MOVIES: &str = "/api/movies/";
    pub const LOGIN: &str = "/api/User/login";
    pub const SIGNUP: &str = "/api/User/signin";
    pub const LOGOUT: &str = "/api/User/logout";
    pub const CURRENT_USER: &str = "/api/User/data";
    pub const REVIEWS: &str = "/api/review/";
    pub const VIEW_REVIEWS: &str = "/api/review/viewreview";

    /// Path of a single movie; the id is percent-encoded
    pub fn movie(imdb_id: &str) -> String {
        format!("/api/movies/imdb/{}", urlencoding::encode(imdb_id))
    }

    /// Join an API origin and a path without doubling the slash
    pub fn url(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}
