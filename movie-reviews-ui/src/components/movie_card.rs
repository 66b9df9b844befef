//! Movie card shown in the listing and the featured row

use leptos::*;
use leptos_router::*;

use movie_reviews::guard::Route;
use movie_reviews::models::Movie;

#[component]
pub fn MovieCard(
    movie: Movie,
    /// Where the card leads; the detail page by default
    #[prop(optional)]
    href: Option<String>,
) -> impl IntoView {
    let href = href.unwrap_or_else(|| Route::MovieDetail(movie.imdb_id.clone()).path());
    let year = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_default();

    view! {
        <A href=href class="block bg-[#14202c] rounded-lg overflow-hidden shadow-lg hover:scale-105 transition-transform">
            <img
                src=movie.poster_or_placeholder().to_string()
                alt=movie.title.clone()
                class="w-full h-72 object-cover"
            />
            <div class="p-4">
                <h3 class="font-semibold truncate">{movie.title.clone()}</h3>
                <div class="flex justify-between text-sm text-gray-400 mt-1">
                    <span>{year}</span>
                    <span>{movie.review_count_label()}</span>
                </div>
                <div class="flex flex-wrap gap-1 mt-2">
                    {movie.genres.iter().take(3).map(|g| view! {
                        <span class="text-xs bg-[#1c2e3e] text-[#7cc36e] px-2 py-0.5 rounded-full">{g.clone()}</span>
                    }).collect_view()}
                </div>
            </div>
        </A>
    }
}
