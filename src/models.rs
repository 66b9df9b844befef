//! Data Model
//!
//! Records exchanged with the MovieReviews API and the session record kept
//! in local storage.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Poster shown when a movie has none
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

/// The logged-in user, as returned by the login/signup endpoints.
///
/// Fields the client does not interpret are kept in `extra` so that a
/// stored record round-trips unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Session {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            mobile: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Drop the password hash the server echoes back in the user document
    pub fn without_password(mut self) -> Self {
        self.extra.remove("password");
        self
    }
}

/// A movie in the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backdrops: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub trailer_link: Option<String>,
    /// Opaque review references; only the count is used
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_ids: Vec<serde_json::Value>,
}

impl Movie {
    /// Parsed release date, if the server sent a recognizable one
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date.as_deref().and_then(parse_date)
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date().map(|d| d.year())
    }

    pub fn poster_or_placeholder(&self) -> &str {
        self.poster
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(PLACEHOLDER_POSTER)
    }

    pub fn first_backdrop(&self) -> Option<&str> {
        self.backdrops.first().map(String::as_str)
    }

    /// YouTube watch links rewritten to their embeddable form
    pub fn trailer_embed_url(&self) -> Option<String> {
        self.trailer_link
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| l.replace("watch?v=", "embed/"))
    }

    pub fn review_count(&self) -> usize {
        self.review_ids.len()
    }

    pub fn review_count_label(&self) -> String {
        match self.review_count() {
            0 => "No reviews yet".to_string(),
            1 => "1 review".to_string(),
            n => format!("{} reviews", n),
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// A review of one movie
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, alias = "name")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, alias = "createdAt")]
    pub created: Option<String>,
}

impl Review {
    pub fn author(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    /// Avatar letter
    pub fn initial(&self) -> char {
        self.author().chars().next().unwrap_or('A')
    }

    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created.as_deref().and_then(parse_date)
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of a successful login or signup
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: Session,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub body: String,
    pub imdb_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLookup {
    pub imdb_id: String,
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and `YYYY-MM-DDTHH:MM:SS[.f]` values
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        serde_json::from_value(serde_json::json!({
            "imdbId": "tt3915174",
            "title": "Puss in Boots: The Last Wish",
            "releaseDate": "2022-12-21",
            "trailerLink": "https://www.youtube.com/watch?v=tHb7WlgyaUc",
            "poster": "https://image.tmdb.org/t/p/w500/1NqwE6LP9IEdOZ57NCT51ftHtWT.jpg",
            "genres": ["Animation", "Action", "Adventure", "Comedy"],
            "backdrops": ["https://image.tmdb.org/t/p/original/r9PkFnRUIthgBp2JZZzD380MWZy.jpg"],
            "reviewIds": [{"body": "great"}, {"body": "fun"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_movie_decoding() {
        let movie = sample_movie();
        assert_eq!(movie.imdb_id, "tt3915174");
        assert_eq!(movie.release_year(), Some(2022));
        assert_eq!(movie.review_count_label(), "2 reviews");
        assert_eq!(
            movie.trailer_embed_url().as_deref(),
            Some("https://www.youtube.com/embed/tHb7WlgyaUc")
        );
        assert!(movie.has_genre("Comedy"));
        assert!(!movie.has_genre("comedy"));
    }

    #[test]
    fn test_movie_with_nulls_and_missing_fields() {
        let movie: Movie = serde_json::from_value(serde_json::json!({
            "imdbId": "tt0000001",
            "title": "Untitled",
            "genres": null,
            "reviewIds": null
        }))
        .unwrap();

        assert!(movie.genres.is_empty());
        assert_eq!(movie.review_count_label(), "No reviews yet");
        assert_eq!(movie.poster_or_placeholder(), PLACEHOLDER_POSTER);
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.trailer_embed_url(), None);
    }

    #[test]
    fn test_review_accepts_server_field_names() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "id": "65f0c0ffee",
            "body": "Loved it",
            "name": "Ana",
            "createdAt": "2024-03-12T18:22:01.123"
        }))
        .unwrap();

        assert_eq!(review.author(), "Ana");
        assert_eq!(review.initial(), 'A');
        assert_eq!(review.created_date(), NaiveDate::from_ymd_opt(2024, 3, 12));
    }

    #[test]
    fn test_anonymous_review() {
        let review = Review {
            user_name: Some("  ".to_string()),
            body: "meh".to_string(),
            created: None,
        };
        assert_eq!(review.author(), "Anonymous");
        assert_eq!(review.created_date(), None);
    }

    #[test]
    fn test_session_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": "65a1b2c3d4e5f6a7b8c9d0e1",
            "name": "Ana",
            "email": "ana@example.com",
            "createdAt": "2024-01-01T00:00:00",
            "password": "5e884898da28"
        });
        let session: Session = serde_json::from_value(raw).unwrap();
        assert_eq!(session.extra.len(), 2);

        let stripped = session.without_password();
        assert!(!stripped.extra.contains_key("password"));
        assert!(stripped.extra.contains_key("createdAt"));
    }

    #[test]
    fn test_session_numeric_and_mongo_ids() {
        let session: Session =
            serde_json::from_value(serde_json::json!({"_id": 42, "name": "Bo"})).unwrap();
        assert_eq!(session.id, "42");
    }

    #[test]
    fn test_request_wire_names() {
        let body = serde_json::to_value(SignupRequest {
            name: "Ana".into(),
            mobile: "555".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        })
        .unwrap();
        assert_eq!(body["confirmPassword"], "pw");

        let body = serde_json::to_value(LoginRequest {
            user_id: "ana@example.com".into(),
            password: "pw".into(),
        })
        .unwrap();
        assert_eq!(body["userId"], "ana@example.com");
    }
}
