//! Landing page
//!
//! Anonymous visitors see a hero card and a featured row drawn from the full
//! catalog, narrowed by the same search and category filters as the listing.
//! Every call to action leads to the login form.

use crate::catalog::{Category, MovieQuery};
use crate::client::MovieApi;
use crate::error::ClientResult;
use crate::guard::Route;
use crate::models::Movie;

pub const HERO_FALLBACK_TITLE: &str = "Featured Movie";
pub const HERO_FALLBACK_BLURB: &str = "A thrilling adventure awaits you in this epic movie.";
pub const NO_FEATURED: &str = "No movies found";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeView {
    pub loading: bool,
    pub featured: Vec<Movie>,
    pub query: MovieQuery,
}

/// Hero card contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub title: String,
    pub poster: String,
    pub blurb: String,
}

impl HomeView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub async fn load<A: MovieApi + ?Sized>(&mut self, api: &A) {
        let result = api.list_movies().await;
        self.apply(result);
    }

    /// A failed fetch leaves the featured row empty
    pub fn apply(&mut self, result: ClientResult<Vec<Movie>>) {
        self.loading = false;
        match result {
            Ok(movies) => {
                tracing::debug!(count = movies.len(), "Featured movies loaded");
                self.featured = movies;
            }
            Err(e) => {
                tracing::error!("Error fetching featured movies: {}", e);
                self.featured.clear();
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.query.category = category;
    }

    /// Featured row: filtered, in server order
    pub fn visible(&self) -> Vec<&Movie> {
        self.query.filter(&self.featured)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.visible().is_empty()).then_some(NO_FEATURED)
    }

    /// First movie of the unfiltered catalog
    pub fn hero(&self) -> Hero {
        match self.featured.first() {
            Some(movie) => Hero {
                title: movie.title.clone(),
                poster: movie.poster_or_placeholder().to_string(),
                blurb: if movie.genres.is_empty() {
                    HERO_FALLBACK_BLURB.to_string()
                } else {
                    movie.genres.join(", ")
                },
            },
            None => Hero {
                title: HERO_FALLBACK_TITLE.to_string(),
                poster: crate::models::PLACEHOLDER_POSTER.to_string(),
                blurb: HERO_FALLBACK_BLURB.to_string(),
            },
        }
    }

    /// Target of every call to action on the page
    pub fn call_to_action(&self) -> Route {
        Route::Login
    }
}
