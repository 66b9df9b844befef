//! Native HTTP client
//!
//! reqwest implementation of [`MovieApi`]. Cookies issued by the server are
//! kept in a reqwest cookie jar and, when a [`CookieFile`] is configured,
//! persisted between runs the way a browser would.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::SET_COOKIE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::cookies::CookieFile;
use super::{endpoints, MovieApi, DEFAULT_API_BASE};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AuthResponse, LoginRequest, Movie, NewReview, Review, ReviewLookup, Session, SignupRequest,
};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// API origin, e.g. "http://localhost:8080"
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Where server cookies are persisted; `None` keeps them in memory only
    pub cookie_file: Option<PathBuf>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
            cookie_file: None,
        }
    }
}

/// MovieReviews REST API client
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookies: Option<CookieFile>,
}

impl HttpClient {
    /// Create a client, replaying any persisted cookies into its jar
    pub fn new(config: HttpClientConfig) -> ClientResult<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Transport(format!("invalid API url {}: {}", config.base_url, e)))?;

        let jar = Arc::new(Jar::default());
        let cookies = config.cookie_file.clone().map(CookieFile::new);

        if let Some(file) = &cookies {
            let stored = file.load();
            tracing::debug!(count = stored.len(), "Restoring API cookies");
            for cookie in &stored {
                jar.add_cookie_str(cookie, &base);
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_provider(jar)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            config,
            cookies,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        endpoints::url(&self.config.base_url, path)
    }

    /// Send a request and turn non-success statuses into [`ClientError`]s.
    ///
    /// The status is checked before the body is touched.
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        self.remember_cookies(&response);

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let error = ClientError::from_status(status.as_u16(), &text);
        tracing::debug!(status = status.as_u16(), error = %error, "API request failed");
        Err(error)
    }

    fn remember_cookies(&self, response: &Response) {
        let Some(file) = &self.cookies else {
            return;
        };

        let issued: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();

        if issued.is_empty() {
            return;
        }

        if let Err(e) = file.record(issued) {
            tracing::warn!("Failed to persist API cookies: {}", e);
        }
    }

    fn forget_cookies(&self) {
        if let Some(file) = &self.cookies {
            if let Err(e) = file.clear() {
                tracing::warn!("Failed to clear API cookies: {}", e);
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Transport("request timed out".to_string())
    } else if e.is_connect() {
        ClientError::Transport(format!("cannot reach API: {}", e))
    } else if e.is_decode() {
        ClientError::Decode(e.to_string())
    } else {
        ClientError::Transport(e.to_string())
    }
}

#[async_trait]
impl MovieApi for HttpClient {
    async fn list_movies(&self) -> ClientResult<Vec<Movie>> {
        let response = self.send(self.client.get(self.url(endpoints::MOVIES))).await?;
        decode(response).await
    }

    async fn get_movie(&self, imdb_id: &str) -> ClientResult<Movie> {
        let response = self
            .send(self.client.get(self.url(&endpoints::movie(imdb_id))))
            .await?;
        decode(response).await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<Session> {
        let response = self
            .send(self.client.post(self.url(endpoints::LOGIN)).json(request))
            .await?;
        let auth: AuthResponse = decode(response).await?;
        Ok(auth.user)
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<Session> {
        let response = self
            .send(self.client.post(self.url(endpoints::SIGNUP)).json(request))
            .await?;
        let auth: AuthResponse = decode(response).await?;
        Ok(auth.user)
    }

    async fn logout(&self) -> ClientResult<()> {
        let result = self.send(self.client.get(self.url(endpoints::LOGOUT))).await;
        self.forget_cookies();
        result.map(|_| ())
    }

    async fn current_user(&self) -> ClientResult<Session> {
        let response = self
            .send(self.client.get(self.url(endpoints::CURRENT_USER)))
            .await?;
        decode(response).await
    }

    async fn post_review(&self, review: &NewReview) -> ClientResult<()> {
        self.send(self.client.post(self.url(endpoints::REVIEWS)).json(review))
            .await?;
        Ok(())
    }

    async fn list_reviews(&self, imdb_id: &str) -> ClientResult<Vec<Review>> {
        let lookup = ReviewLookup {
            imdb_id: imdb_id.to_string(),
        };
        let response = self
            .send(self.client.post(self.url(endpoints::VIEW_REVIEWS)).json(&lookup))
            .await?;
        let reviews: Option<Vec<Review>> = decode(response).await?;
        Ok(reviews.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{header, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    const SESSION_COOKIE: &str = "user_id=65a1b2c3d4e5f6a7b8c9d0e1";

    async fn movies() -> Json<Value> {
        Json(json!([
            {"imdbId": "tt1", "title": "Alpha", "genres": ["Drama"], "releaseDate": "2001-01-01", "reviewIds": []},
            {"imdbId": "tt2", "title": "Beta", "genres": ["Action"], "releaseDate": "2010-05-05", "reviewIds": [{}]}
        ]))
    }

    async fn movie(Path(id): Path<String>) -> impl IntoResponse {
        if id == "tt1" {
            (StatusCode::OK, Json(json!({"imdbId": "tt1", "title": "Alpha"}))).into_response()
        } else {
            (StatusCode::NOT_FOUND, "Movie Not Found").into_response()
        }
    }

    async fn login(Json(body): Json<Value>) -> impl IntoResponse {
        if body["password"] == "secret" {
            (
                StatusCode::OK,
                [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))],
                Json(json!({
                    "message": "User Login successfully",
                    "user": {"id": "65a1b2c3d4e5f6a7b8c9d0e1", "name": "Ana", "password": "hash"}
                })),
            )
                .into_response()
        } else {
            (StatusCode::BAD_REQUEST, Json(json!({"message": "Wrong Password"}))).into_response()
        }
    }

    async fn create_review(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !cookie.contains(SESSION_COOKIE) {
            return (StatusCode::BAD_REQUEST, Json(json!({"message": "Login To Continue"})));
        }
        (StatusCode::OK, Json(json!({"body": body["body"], "name": "Ana"})))
    }

    async fn view_reviews(Json(body): Json<Value>) -> Json<Value> {
        if body["imdbId"] == "tt1" {
            Json(json!([{"name": "Ana", "body": "Great", "createdAt": "2024-03-12T10:00:00"}]))
        } else {
            Json(Value::Null)
        }
    }

    async fn logout() -> impl IntoResponse {
        (
            [(header::SET_COOKIE, "user_id=; Max-Age=0; Path=/")],
            Json(json!({"message": "User successfully logged out"})),
        )
    }

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route("/api/movies/", get(movies))
            .route("/api/movies/imdb/:id", get(movie))
            .route("/api/User/login", post(login))
            .route("/api/User/logout", get(logout))
            .route("/api/review/", post(create_review))
            .route("/api/review/viewreview", post(view_reviews));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String, cookie_file: Option<PathBuf>) -> HttpClient {
        HttpClient::new(HttpClientConfig {
            base_url,
            request_timeout_secs: 5,
            cookie_file,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_and_get_movies() {
        let client = client_for(spawn_stub().await, None);

        let movies = client.list_movies().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].review_count(), 1);

        let movie = client.get_movie("tt1").await.unwrap();
        assert_eq!(movie.title, "Alpha");
    }

    #[tokio::test]
    async fn test_unknown_movie_is_not_found() {
        let client = client_for(spawn_stub().await, None);

        let err = client.get_movie("tt404").await.unwrap_err();
        assert_eq!(err, ClientError::NotFound("Movie Not Found".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_carries_server_message() {
        let client = client_for(spawn_stub().await, None);

        let err = client
            .login(&LoginRequest {
                user_id: "ana@example.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Wrong Password");
    }

    #[tokio::test]
    async fn test_cookies_survive_a_new_client() {
        let base = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let cookie_path = dir.path().join("cookies.json");

        let first = client_for(base.clone(), Some(cookie_path.clone()));
        let session = first
            .login(&LoginRequest {
                user_id: "ana@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.name, "Ana");

        // A fresh process only has the persisted cookies
        let second = client_for(base, Some(cookie_path.clone()));
        second
            .post_review(&NewReview {
                body: "Great".into(),
                imdb_id: "tt1".into(),
            })
            .await
            .unwrap();

        second.logout().await.unwrap();
        assert!(CookieFile::new(cookie_path).load().is_empty());
    }

    #[tokio::test]
    async fn test_review_without_cookie_is_rejected() {
        let client = client_for(spawn_stub().await, None);

        let err = client
            .post_review(&NewReview {
                body: "Great".into(),
                imdb_id: "tt1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Login To Continue");
    }

    #[tokio::test]
    async fn test_list_reviews_null_is_empty() {
        let client = client_for(spawn_stub().await, None);

        let reviews = client.list_reviews("tt1").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author(), "Ana");

        assert!(client.list_reviews("tt2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_transport_error() {
        let client = client_for("http://127.0.0.1:1".to_string(), None);

        let err = client.list_movies().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpClient::new(HttpClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
