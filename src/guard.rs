//! Routes and the access guard
//!
//! Maps URL paths to views and decides, from session presence alone,
//! whether a view renders or redirects. Both the CLI and the browser
//! frontend go through [`decide`].

use std::fmt;

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` landing page
    Home,
    /// `/login` login and registration forms
    Login,
    /// `/movies` catalog
    Movies,
    /// `/movie/:id` one movie and its reviews
    MovieDetail(String),
    /// Anything else
    NotFound,
}

/// Outcome of the guard for one route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(Route),
}

impl Route {
    /// Parse a path; query string, fragment and a trailing slash are ignored
    pub fn parse(path: &str) -> Route {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let trimmed = path.trim_matches('/');

        if trimmed.is_empty() {
            return Route::Home;
        }

        let mut segments = trimmed.split('/');
        let first = segments.next().unwrap_or_default();
        let second = segments.next();
        let rest = segments.next();

        match (first, second, rest) {
            (s, None, None) if s.eq_ignore_ascii_case("login") => Route::Login,
            (s, None, None) if s.eq_ignore_ascii_case("movies") => Route::Movies,
            (s, Some(id), None) if s.eq_ignore_ascii_case("movie") && !id.is_empty() => {
                let id = urlencoding::decode(id)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| id.to_string());
                Route::MovieDetail(id)
            }
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Movies => "/movies".to_string(),
            Route::MovieDetail(id) => format!("/movie/{}", urlencoding::encode(id)),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Only reachable with a session
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Movies | Route::MovieDetail(_))
    }

    /// Only meant for anonymous visitors
    pub fn is_anonymous_only(&self) -> bool {
        matches!(self, Route::Home | Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The access policy
pub fn decide(route: &Route, signed_in: bool) -> Access {
    if signed_in && route.is_anonymous_only() {
        Access::Redirect(Route::Movies)
    } else if !signed_in && route.is_protected() {
        Access::Redirect(Route::Home)
    } else {
        Access::Render
    }
}

/// Follow redirects to the route that actually renders
pub fn resolve(route: Route, signed_in: bool) -> Route {
    let mut current = route;
    // Redirect targets render for the same session state: one hop at most.
    for _ in 0..4 {
        match decide(&current, signed_in) {
            Access::Render => return current,
            Access::Redirect(next) => {
                tracing::debug!(from = %current, to = %next, "Guard redirect");
                current = next;
            }
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/Login/"), Route::Login);
        assert_eq!(Route::parse("/movies?sort=title"), Route::Movies);
        assert_eq!(
            Route::parse("/movie/tt3915174"),
            Route::MovieDetail("tt3915174".to_string())
        );
        assert_eq!(
            Route::parse("/movie/a%20b#reviews"),
            Route::MovieDetail("a b".to_string())
        );
        assert_eq!(Route::parse("/movie/"), Route::NotFound);
        assert_eq!(Route::parse("/movie/tt1/extra"), Route::NotFound);
        assert_eq!(Route::parse("/settings"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Movies,
            Route::MovieDetail("tt 1/2".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_anonymous_access() {
        assert_eq!(decide(&Route::Home, false), Access::Render);
        assert_eq!(decide(&Route::Login, false), Access::Render);
        assert_eq!(decide(&Route::Movies, false), Access::Redirect(Route::Home));
        assert_eq!(
            decide(&Route::MovieDetail("tt1".into()), false),
            Access::Redirect(Route::Home)
        );
        assert_eq!(decide(&Route::NotFound, false), Access::Render);
    }

    #[test]
    fn test_signed_in_access() {
        assert_eq!(decide(&Route::Home, true), Access::Redirect(Route::Movies));
        assert_eq!(decide(&Route::Login, true), Access::Redirect(Route::Movies));
        assert_eq!(decide(&Route::Movies, true), Access::Render);
        assert_eq!(decide(&Route::MovieDetail("tt1".into()), true), Access::Render);
        assert_eq!(decide(&Route::NotFound, true), Access::Render);
    }

    #[test]
    fn test_resolve_lands_on_rendering_route() {
        assert_eq!(resolve(Route::Login, true), Route::Movies);
        assert_eq!(resolve(Route::MovieDetail("tt1".into()), false), Route::Home);
        assert_eq!(resolve(Route::Movies, true), Route::Movies);
    }
}
