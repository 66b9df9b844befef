//! API Client
//!
//! Browser implementation of the shared [`MovieApi`](movie_reviews::MovieApi)
//! trait on top of gloo-net.

pub mod client;

pub use client::{get_api_base, BrowserApi};
