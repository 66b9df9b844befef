//! Movie detail and reviews
//!
//! The movie and its reviews load concurrently. Responses carry the id they
//! were requested for and are dropped when the view has moved on to another
//! movie in the meantime.

use crate::client::MovieApi;
use crate::error::{ClientError, ClientResult, ErrorTreatment};
use crate::fetch::FetchState;
use crate::guard::Route;
use crate::models::{Movie, NewReview, Review};
use crate::session::{SessionContext, SessionStorage};

pub const EMPTY_REVIEW: &str = "Review cannot be empty";
pub const REVIEW_FAILED: &str = "Failed to submit review. Please try again.";
pub const NO_REVIEWS: &str = "No reviews yet. Be the first to share your thoughts!";

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub imdb_id: String,
    pub movie: FetchState<Movie>,
    pub reviews: FetchState<Vec<Review>>,
    /// Review form text
    pub draft: String,
    pub review_error: Option<String>,
    pub submitting: bool,
}

/// Result of a review submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Stored; the list was re-fetched and the draft cleared
    Posted,
    /// Rejected locally, nothing sent
    Invalid,
    /// No session (or the server rejected it); go to the login form
    RedirectToLogin,
    /// The server refused the review
    Failed,
}

impl ReviewOutcome {
    pub fn next_route(&self) -> Option<Route> {
        match self {
            ReviewOutcome::RedirectToLogin => Some(Route::Login),
            _ => None,
        }
    }
}

impl DetailView {
    pub fn new(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            movie: FetchState::Loading,
            reviews: FetchState::Loading,
            draft: String::new(),
            review_error: None,
            submitting: false,
        }
    }

    /// Point the view at another movie; everything starts loading again
    pub fn navigate(&mut self, imdb_id: impl Into<String>) {
        let imdb_id = imdb_id.into();
        if imdb_id != self.imdb_id {
            *self = Self::new(imdb_id);
        }
    }

    /// Apply the movie response for `imdb_id`; returns false if it was stale
    pub fn apply_movie(&mut self, imdb_id: &str, result: ClientResult<Movie>) -> bool {
        if imdb_id != self.imdb_id {
            tracing::debug!(stale = imdb_id, current = %self.imdb_id, "Dropping stale movie response");
            return false;
        }
        if let Err(e) = &result {
            tracing::error!("Error fetching movie details: {}", e);
        }
        self.movie = FetchState::from_result(result);
        true
    }

    /// Apply the review list for `imdb_id`; returns false if it was stale
    pub fn apply_reviews(&mut self, imdb_id: &str, result: ClientResult<Vec<Review>>) -> bool {
        if imdb_id != self.imdb_id {
            tracing::debug!(stale = imdb_id, current = %self.imdb_id, "Dropping stale reviews response");
            return false;
        }
        if let Err(e) = &result {
            tracing::error!("Error fetching reviews: {}", e);
        }
        self.reviews = FetchState::from_result(result);
        true
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.review_error = None;
    }

    /// A load failed because the server rejected the session
    pub fn session_error(&self) -> Option<&ClientError> {
        [self.movie.error(), self.reviews.error()]
            .into_iter()
            .flatten()
            .find(|e| e.treatment() == ErrorTreatment::SignIn)
    }

    /// Whole-page error replacing the view, with "Back to Movies".
    ///
    /// A rejected session is not a page error; it goes to the login form.
    pub fn page_error(&self) -> Option<String> {
        let error = self.movie.error()?;
        if error.treatment() == ErrorTreatment::SignIn {
            return None;
        }
        Some(match error {
            ClientError::NotFound(_) => "Movie not found".to_string(),
            e => e.user_message_or("Failed to fetch movie details"),
        })
    }

    /// Where the error page's back button leads
    pub fn back_route(&self) -> Route {
        Route::Movies
    }

    /// Banner in the review section when the list could not be loaded
    pub fn reviews_banner(&self) -> Option<String> {
        self.reviews
            .error()
            .filter(|e| e.treatment() != ErrorTreatment::SignIn)
            .map(|e| e.user_message_or("Failed to fetch reviews"))
    }

    pub fn review_list(&self) -> &[Review] {
        self.reviews.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn review_count_label(&self) -> String {
        match self.review_list().len() {
            1 => "1 Review".to_string(),
            n => format!("{} Reviews", n),
        }
    }
}

/// Fetch the movie and its reviews concurrently
pub async fn load<A: MovieApi + ?Sized>(api: &A, view: &mut DetailView) {
    let imdb_id = view.imdb_id.clone();
    let (movie, reviews) = futures_util::join!(api.get_movie(&imdb_id), api.list_reviews(&imdb_id));
    view.apply_movie(&imdb_id, movie);
    view.apply_reviews(&imdb_id, reviews);
}

/// Submit the draft as a review of the current movie
pub async fn submit_review<A, S>(api: &A, ctx: &SessionContext<S>, view: &mut DetailView) -> ReviewOutcome
where
    A: MovieApi + ?Sized,
    S: SessionStorage,
{
    if !ctx.is_signed_in() {
        return ReviewOutcome::RedirectToLogin;
    }
    if view.draft.trim().is_empty() {
        view.review_error = Some(EMPTY_REVIEW.to_string());
        return ReviewOutcome::Invalid;
    }

    let imdb_id = view.imdb_id.clone();
    let review = NewReview {
        body: view.draft.clone(),
        imdb_id: imdb_id.clone(),
    };

    view.submitting = true;
    let posted = api.post_review(&review).await;
    view.submitting = false;

    match posted {
        Ok(()) => {
            tracing::info!(imdb_id = %imdb_id, "Review submitted");
            view.draft.clear();
            view.review_error = None;
            let reviews = api.list_reviews(&imdb_id).await;
            view.apply_reviews(&imdb_id, reviews);
            ReviewOutcome::Posted
        }
        Err(e) => match super::expire_session(ctx, &e) {
            Some(_) => ReviewOutcome::RedirectToLogin,
            None => {
                tracing::error!("Error submitting review: {}", e);
                view.review_error = Some(REVIEW_FAILED.to_string());
                ReviewOutcome::Failed
            }
        },
    }
}
