//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod category_bar;
pub mod error_view;
pub mod loading;
pub mod movie_card;
pub mod nav;
pub mod toast;

pub use category_bar::CategoryBar;
pub use error_view::{ErrorBanner, ErrorPage, ErrorRetry};
pub use loading::Loading;
pub use movie_card::MovieCard;
pub use nav::Nav;
pub use toast::Toast;
