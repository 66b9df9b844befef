//! Catalog filtering and sorting
//!
//! The movie listing is fetched once and every filter or sort change is
//! recomputed from the full in-memory list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Movie;

/// Category buttons offered by the listing, in display order
pub const CATEGORIES: [&str; 7] = ["All", "Action", "Drama", "Comedy", "Sci-Fi", "Horror", "Romance"];

/// Genre filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    /// No filtering
    #[default]
    All,
    /// Movies whose genre list contains this exact genre
    Genre(String),
}

impl Category {
    /// Every selectable category
    pub fn all() -> Vec<Category> {
        CATEGORIES
            .iter()
            .map(|c| Category::from_label(c))
            .collect()
    }

    fn from_label(label: &str) -> Category {
        if label == "All" {
            Category::All
        } else {
            Category::Genre(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::All => "All",
            Category::Genre(g) => g,
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            Category::All => true,
            Category::Genre(genre) => movie.has_genre(genre),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive lookup in [`CATEGORIES`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(s.trim()))
            .map(|c| Category::from_label(c))
            .ok_or_else(|| format!("unknown category '{}' (expected one of: {})", s, CATEGORIES.join(", ")))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Alphabetical by title
    #[default]
    Title,
    /// Newest release first
    ReleaseDate,
}

impl SortKey {
    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortKey::Title => compare_titles(&a.title, &b.title),
            SortKey::ReleaseDate => compare_release_dates(a, b),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Sort by Title",
            SortKey::ReleaseDate => "Sort by Release Date",
        }
    }

    /// Value used in forms and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::ReleaseDate => "releaseDate",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "date" | "releasedate" | "release-date" => Ok(SortKey::ReleaseDate),
            other => Err(format!("unknown sort key '{}' (expected title or date)", other)),
        }
    }
}

/// Case-insensitive title order; ties fall back to the raw titles so the
/// order stays total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Newest first; movies without a parseable date go last
pub fn compare_release_dates(a: &Movie, b: &Movie) -> Ordering {
    match (a.release_date(), b.release_date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive substring match on the title; an empty query matches all
pub fn matches_search(movie: &Movie, query: &str) -> bool {
    query.is_empty() || movie.title.to_lowercase().contains(&query.to_lowercase())
}

/// Search text, category and sort order of the listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieQuery {
    pub search: String,
    pub category: Category,
    pub sort: SortKey,
}

impl MovieQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        matches_search(movie, &self.search) && self.category.matches(movie)
    }

    /// Filtered movies in their original order
    pub fn filter<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        movies.iter().filter(|m| self.matches(m)).collect()
    }

    /// Filtered and sorted movies
    pub fn apply<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        let mut visible = self.filter(movies);
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }
}

/// "1 Movie Found" / "12 Movies Found"
pub fn result_label(count: usize) -> String {
    if count == 1 {
        "1 Movie Found".to_string()
    } else {
        format!("{} Movies Found", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str, genres: &[&str], date: Option<&str>) -> Movie {
        Movie {
            imdb_id: id.to_string(),
            title: title.to_string(),
            poster: None,
            backdrops: Vec::new(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            release_date: date.map(str::to_string),
            trailer_link: None,
            review_ids: Vec::new(),
        }
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie("tt1", "The Matrix", &["Action", "Sci-Fi"], Some("1999-03-31")),
            movie("tt2", "avatar", &["Sci-Fi"], Some("2009-12-18")),
            movie("tt3", "Matrix Reloaded", &["Action"], Some("2003-05-15")),
            movie("tt4", "Amélie", &["Comedy", "Romance"], Some("2001-04-25")),
            movie("tt5", "Unknown Date", &["Drama"], None),
            movie("tt6", "Avatar", &["Action"], Some("2009-12-18")),
            movie("tt7", "Hereditary", &["Horror", "Drama"], Some("2018-06-08T00:00:00Z")),
        ]
    }

    fn ids(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.imdb_id.clone()).collect()
    }

    #[test]
    fn test_search_keeps_exactly_matching_titles() {
        let movies = catalog();
        for query in ["", "matrix", "MATRIX", "av", "é", "zzz", " "] {
            let result = MovieQuery::new().search(query).filter(&movies);
            let expected: Vec<&Movie> = movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&query.to_lowercase()))
                .collect();
            assert_eq!(ids(&result), ids(&expected), "query {:?}", query);
        }
    }

    #[test]
    fn test_category_keeps_exactly_members() {
        let movies = catalog();
        for label in CATEGORIES.iter().skip(1) {
            let category: Category = label.parse().unwrap();
            let result = MovieQuery::new().category(category).filter(&movies);
            assert!(result.iter().all(|m| m.genres.iter().any(|g| g == label)));
            let members = movies.iter().filter(|m| m.has_genre(label)).count();
            assert_eq!(result.len(), members, "category {}", label);
        }
    }

    #[test]
    fn test_all_category_is_noop() {
        let movies = catalog();
        let result = MovieQuery::new().category(Category::All).filter(&movies);
        assert_eq!(result.len(), movies.len());
    }

    #[test]
    fn test_filters_combine() {
        let movies = catalog();
        let result = MovieQuery::new()
            .search("matrix")
            .category(Category::Genre("Sci-Fi".to_string()))
            .apply(&movies);
        assert_eq!(ids(&result), vec!["tt1"]);
    }

    #[test]
    fn test_title_sort_is_total_and_lexicographic() {
        let movies = catalog();
        let sorted = MovieQuery::new().sort(SortKey::Title).apply(&movies);

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0].title, &pair[1].title);
            assert_eq!(compare_titles(a, b), Ordering::Less, "{} before {}", a, b);
            assert!(a.to_lowercase() <= b.to_lowercase());
        }
        // Equal ignoring case still has a defined order
        assert_eq!(compare_titles("Avatar", "avatar"), Ordering::Less);
    }

    #[test]
    fn test_release_date_sort_is_non_increasing() {
        let movies = catalog();
        let sorted = MovieQuery::new().sort(SortKey::ReleaseDate).apply(&movies);

        let dates: Vec<_> = sorted.iter().filter_map(|m| m.release_date()).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(sorted.first().map(|m| m.imdb_id.as_str()), Some("tt7"));
        assert_eq!(sorted.last().map(|m| m.imdb_id.as_str()), Some("tt5"));
    }

    #[test]
    fn test_parse_category_and_sort() {
        assert_eq!("all".parse::<Category>(), Ok(Category::All));
        assert_eq!("sci-fi".parse::<Category>(), Ok(Category::Genre("Sci-Fi".to_string())));
        assert!("Western".parse::<Category>().is_err());
        assert_eq!("date".parse::<SortKey>(), Ok(SortKey::ReleaseDate));
        assert_eq!("releaseDate".parse::<SortKey>(), Ok(SortKey::ReleaseDate));
        assert_eq!("Title".parse::<SortKey>(), Ok(SortKey::Title));
        assert!("rating".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_result_label() {
        assert_eq!(result_label(1), "1 Movie Found");
        assert_eq!(result_label(0), "0 Movies Found");
        assert_eq!(result_label(3), "3 Movies Found");
    }
}
