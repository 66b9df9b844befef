//! Movie Detail Page
//!
//! Movie information, trailer, reviews and the review form. The movie and
//! its reviews are fetched concurrently whenever the route id changes.

use leptos::*;
use leptos_router::*;

use movie_reviews::fetch::FetchState;
use movie_reviews::models::Review;
use movie_reviews::views::detail::{self, DetailView, ReviewOutcome, NO_REVIEWS};
use movie_reviews::MovieApi;

use crate::components::{ErrorBanner, ErrorPage, Loading};
use crate::state::AppState;

#[component]
pub fn MovieDetail() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let navigate = use_navigate();
    let params = use_params_map();

    let imdb_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let view_state = create_rw_signal(DetailView::new(
        params.with_untracked(|p| p.get("id").cloned().unwrap_or_default()),
    ));

    // Refetch when the id in the URL changes
    create_effect({
        let state = state.clone();
        let navigate = navigate.clone();
        move |_| {
            let id = imdb_id();
            view_state.update(|v| v.navigate(id.clone()));

            let state = state.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let (movie, reviews) =
                    futures_util::join!(state.api.get_movie(&id), state.api.list_reviews(&id));
                if let Err(e) = &movie {
                    web_sys::console::error_1(&format!("Error fetching movie details: {}", e).into());
                }
                view_state.update(|v| {
                    v.apply_movie(&id, movie);
                    v.apply_reviews(&id, reviews);
                });

                let expired = view_state
                    .with_untracked(|v| v.session_error().and_then(|e| state.expire_session(e)));
                if let Some(next) = expired {
                    navigate(&next.path(), Default::default());
                }
            });
        }
    });

    let on_submit = {
        let state = state.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            if view_state.with_untracked(|v| v.submitting) {
                return;
            }

            let mut snapshot = view_state.get_untracked();
            view_state.update(|v| v.submitting = true);

            let state = state.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let outcome = detail::submit_review(&state.api, &state.ctx, &mut snapshot).await;

                view_state.update(|v| {
                    v.submitting = false;
                    if v.imdb_id != snapshot.imdb_id {
                        return;
                    }
                    v.review_error = snapshot.review_error.take();
                    if outcome == ReviewOutcome::Posted {
                        v.draft.clear();
                        v.reviews = snapshot.reviews.clone();
                    }
                });
                state.sync();

                if outcome == ReviewOutcome::Posted {
                    state.show_success("Review submitted successfully!");
                }
                if let Some(next) = outcome.next_route() {
                    navigate(&next.path(), Default::default());
                }
            });
        }
    };

    // Page-level parts only change when the movie response does; the
    // review section tracks its own fields so typing keeps focus.
    let movie = create_memo(move |_| view_state.with(|v| v.movie.clone()));
    let page_error = create_memo(move |_| view_state.with(|v| v.page_error()));
    let back_href = view_state.with_untracked(|v| v.back_route().path());

    move || {
        if let Some(message) = page_error.get() {
            return view! { <ErrorPage message=message back_href=back_href.clone() /> }.into_view();
        }
        let FetchState::Success(movie) = movie.get() else {
            return view! { <Loading /> }.into_view();
        };
        let on_submit = on_submit.clone();

        let backdrop = movie
            .first_backdrop()
            .unwrap_or(movie.poster_or_placeholder())
            .to_string();
        let year = movie.release_year().map(|y| y.to_string()).unwrap_or_default();

        view! {
            <div>
                // Backdrop header
                <div
                    class="relative h-80 bg-cover bg-center"
                    style=format!("background-image: url('{}')", backdrop)
                >
                    <div class="absolute inset-0 bg-gradient-to-t from-[#0a141f] to-transparent"></div>
                </div>

                <div class="container mx-auto px-4 -mt-40 relative">
                    <div class="flex flex-col md:flex-row gap-8">
                        <img
                            src=movie.poster_or_placeholder().to_string()
                            alt=movie.title.clone()
                            class="w-64 rounded-lg shadow-2xl"
                        />
                        <div class="flex-1 pt-32 md:pt-40">
                            <h1 class="text-4xl font-bold mb-2">{movie.title.clone()}</h1>
                            <div class="flex items-center gap-4 text-gray-400 mb-4">
                                <span>{year}</span>
                                <span>{move || view_state.with(|v| v.review_count_label())}</span>
                            </div>
                            <div class="flex flex-wrap gap-2">
                                {movie.genres.iter().map(|g| view! {
                                    <span class="bg-[#1c2e3e] text-[#7cc36e] px-3 py-1 rounded-full text-sm">{g.clone()}</span>
                                }).collect_view()}
                            </div>
                        </div>
                    </div>

                    // Trailer
                    {movie.trailer_embed_url().map(|src| view! {
                        <section class="mt-12">
                            <h2 class="text-2xl font-bold mb-4">"Trailer"</h2>
                            <div class="aspect-video">
                                <iframe
                                    src=src
                                    title="Trailer"
                                    class="w-full h-full rounded-lg"
                                    allowfullscreen=true
                                ></iframe>
                            </div>
                        </section>
                    })}

                    // Reviews
                    <section class="mt-12 mb-12">
                        <h2 class="text-2xl font-bold mb-4">"Reviews"</h2>

                        <ErrorBanner
                            message=Signal::derive(move || view_state.with(|v| v.reviews_banner()))
                            on_dismiss=|| {}
                        />

                        <form on:submit=on_submit class="bg-[#14202c] rounded-lg p-6 mb-8">
                            <ErrorBanner
                                message=Signal::derive(move || view_state.with(|v| v.review_error.clone()))
                                on_dismiss=move || view_state.update(|v| v.review_error = None)
                            />
                            <textarea
                                rows="4"
                                placeholder="Share your thoughts about this movie..."
                                class="w-full px-4 py-3 rounded-md bg-[#1c2e3e] text-white focus:outline-none focus:ring-2 focus:ring-[#7cc36e]"
                                prop:value=move || view_state.with(|v| v.draft.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    view_state.update(|v| v.set_draft(value));
                                }
                            ></textarea>
                            <button
                                type="submit"
                                class="mt-4 px-6 py-2 bg-[#7cc36e] hover:bg-[#6aad5d] rounded-md font-bold disabled:opacity-50"
                                disabled=move || view_state.with(|v| v.submitting)
                            >
                                {move || if view_state.with(|v| v.submitting) { "Submitting..." } else { "Submit Review" }}
                            </button>
                        </form>

                        {move || view_state.with(|v| {
                            if v.review_list().is_empty() && v.reviews_banner().is_none() {
                                view! { <p class="text-gray-400 text-center py-8">{NO_REVIEWS}</p> }.into_view()
                            } else {
                                v.review_list().iter().map(review_item).collect_view()
                            }
                        })}
                    </section>
                </div>
            </div>
        }.into_view()
    }
}

fn review_item(review: &Review) -> impl IntoView {
    let date = review
        .created_date()
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default();

    view! {
        <div class="bg-[#14202c] rounded-lg p-6 mb-4">
            <div class="flex items-center gap-3 mb-3">
                <div class="w-10 h-10 rounded-full bg-[#7cc36e] flex items-center justify-center font-bold">
                    {review.initial().to_string()}
                </div>
                <div>
                    <div class="font-semibold">{review.author().to_string()}</div>
                    <div class="text-sm text-gray-400">{date}</div>
                </div>
            </div>
            <p class="text-gray-300">{review.body.clone()}</p>
        </div>
    }
}
