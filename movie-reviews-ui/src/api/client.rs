//! HTTP API Client
//!
//! gloo-net requests against the MovieReviews API. Every request carries the
//! browser's cookies so the server session follows the user.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use movie_reviews::client::{endpoints, MovieApi, DEFAULT_API_BASE};
use movie_reviews::error::{ClientError, ClientResult};
use movie_reviews::models::{
    AuthResponse, LoginRequest, Movie, NewReview, Review, ReviewLookup, Session, SignupRequest,
};

/// Local storage key overriding the API origin
const API_URL_KEY: &str = "movie_reviews_api_url";

/// Get the API origin from local storage or use the default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// MovieReviews API as seen from the browser
#[derive(Debug, Clone)]
pub struct BrowserApi {
    base: String,
}

impl BrowserApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Client for the configured origin
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&endpoints::url(&self.base, path)).credentials(RequestCredentials::Include)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&endpoints::url(&self.base, path)).credentials(RequestCredentials::Include)
    }
}

fn build(builder: RequestBuilder) -> ClientResult<Request> {
    builder
        .build()
        .map_err(|e| ClientError::Transport(format!("Request build error: {}", e)))
}

fn with_json<T: Serialize>(builder: RequestBuilder, body: &T) -> ClientResult<Request> {
    builder
        .json(body)
        .map_err(|e| ClientError::Transport(format!("Request build error: {}", e)))
}

/// Status is checked before the body is read
async fn send(request: Request) -> ClientResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::from_status(status, &text));
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl MovieApi for BrowserApi {
    async fn list_movies(&self) -> ClientResult<Vec<Movie>> {
        let response = send(build(self.get(endpoints::MOVIES))?).await?;
        decode(response).await
    }

    async fn get_movie(&self, imdb_id: &str) -> ClientResult<Movie> {
        let response = send(build(self.get(&endpoints::movie(imdb_id)))?).await?;
        decode(response).await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<Session> {
        let response = send(with_json(self.post(endpoints::LOGIN), request)?).await?;
        let auth: AuthResponse = decode(response).await?;
        Ok(auth.user)
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<Session> {
        let response = send(with_json(self.post(endpoints::SIGNUP), request)?).await?;
        let auth: AuthResponse = decode(response).await?;
        Ok(auth.user)
    }

    async fn logout(&self) -> ClientResult<()> {
        send(build(self.get(endpoints::LOGOUT))?).await?;
        Ok(())
    }

    async fn current_user(&self) -> ClientResult<Session> {
        let response = send(build(self.get(endpoints::CURRENT_USER))?).await?;
        decode(response).await
    }

    async fn post_review(&self, review: &NewReview) -> ClientResult<()> {
        send(with_json(self.post(endpoints::REVIEWS), review)?).await?;
        Ok(())
    }

    async fn list_reviews(&self, imdb_id: &str) -> ClientResult<Vec<Review>> {
        let lookup = ReviewLookup {
            imdb_id: imdb_id.to_string(),
        };
        let response = send(with_json(self.post(endpoints::VIEW_REVIEWS), &lookup)?).await?;
        let reviews: Option<Vec<Review>> = decode(response).await?;
        Ok(reviews.unwrap_or_default())
    }
}
