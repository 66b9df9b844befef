//! Catalog listing
//!
//! The full list is fetched once on mount; search, category and sort are
//! applied locally on every change.

use crate::catalog::{self, Category, MovieQuery, SortKey};
use crate::client::MovieApi;
use crate::error::{ClientError, ClientResult, ErrorTreatment};
use crate::fetch::FetchState;
use crate::guard::Route;
use crate::models::Movie;
use crate::session::{SessionContext, SessionStorage};

/// Shown when no movie passes the filters
pub const NO_RESULTS: &str = "No movies found matching your criteria";

pub const LOAD_FAILED: &str = "Failed to fetch movies";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoviesView {
    pub movies: FetchState<Vec<Movie>>,
    pub query: MovieQuery,
}

impl MoviesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: MovieQuery) -> Self {
        Self {
            movies: FetchState::Loading,
            query,
        }
    }

    /// Fetch the catalog into this view
    pub async fn load<A: MovieApi + ?Sized>(&mut self, api: &A) {
        let result = api.list_movies().await;
        if let Err(e) = &result {
            tracing::error!("Failed to fetch movies: {}", e);
        }
        self.apply(result);
    }

    pub fn apply(&mut self, result: ClientResult<Vec<Movie>>) {
        self.movies = FetchState::from_result(result);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.query.category = category;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    /// Movies passing the current filters, in the current order
    pub fn visible(&self) -> Vec<&Movie> {
        self.movies
            .data()
            .map(|movies| self.query.apply(movies))
            .unwrap_or_default()
    }

    pub fn result_label(&self) -> String {
        catalog::result_label(self.visible().len())
    }

    /// Empty-state text, once loaded and nothing matches
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.movies {
            FetchState::Success(_) if self.visible().is_empty() => Some(NO_RESULTS),
            _ => None,
        }
    }

    /// The catalog load failed because the server rejected the session
    pub fn session_error(&self) -> Option<&ClientError> {
        self.movies
            .error()
            .filter(|e| e.treatment() == ErrorTreatment::SignIn)
    }

    /// Error shown in place of the listing; a rejected session is not one
    pub fn page_error(&self) -> Option<String> {
        self.movies
            .error()
            .filter(|e| e.treatment() != ErrorTreatment::SignIn)
            .map(|e| e.user_message_or(LOAD_FAILED))
    }

    pub fn open(&self, movie: &Movie) -> Route {
        Route::MovieDetail(movie.imdb_id.clone())
    }
}

/// Logout from the listing's navigation bar
pub async fn logout<A, S>(api: &A, ctx: &SessionContext<S>) -> Route
where
    A: MovieApi + ?Sized,
    S: SessionStorage,
{
    super::sign_out(api, ctx).await
}
