//! Pages
//!
//! One component per route.

pub mod home;
pub mod login;
pub mod movie_detail;
pub mod movies;

pub use home::Home;
pub use login::Login;
pub use movie_detail::MovieDetail;
pub use movies::Movies;
