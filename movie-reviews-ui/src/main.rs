//! MovieReviews Frontend
//!
//! Browse the movie catalog and share reviews, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Session handling, the route guard, catalog filtering and the
//! per-view state come from the `movie-reviews` core crate; this crate adds
//! the browser API client, local storage and the components.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
