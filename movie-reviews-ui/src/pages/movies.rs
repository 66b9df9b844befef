//! Movies Page
//!
//! The full catalog with search, category filter and sort, applied
//! locally on every change.

use leptos::*;
use leptos_router::*;

use movie_reviews::catalog::SortKey;
use movie_reviews::fetch::FetchState;
use movie_reviews::views::movies::MoviesView;
use movie_reviews::MovieApi;

use crate::components::{CategoryBar, ErrorRetry, Loading, MovieCard};
use crate::state::AppState;

#[component]
pub fn Movies() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let view_state = create_rw_signal(MoviesView::new());

    let navigate = use_navigate();
    let load = move || {
        let state = state.clone();
        let navigate = navigate.clone();
        view_state.update(|v| v.movies = FetchState::Loading);
        spawn_local(async move {
            let result = state.api.list_movies().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching movies: {}", e).into());
            }
            view_state.update(|v| v.apply(result));

            let expired = view_state
                .with_untracked(|v| v.session_error().and_then(|e| state.expire_session(e)));
            if let Some(next) = expired {
                navigate(&next.path(), Default::default());
            }
        });
    };

    // Fetch the catalog on mount
    create_effect({
        let load = load.clone();
        move |_| load()
    });

    let on_sort = move |ev: ev::Event| {
        if let Ok(sort) = event_target_value(&ev).parse::<SortKey>() {
            view_state.update(|v| v.set_sort(sort));
        }
    };

    view! {
        <div class="container mx-auto px-4 py-8">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4 mb-6">
                <h1 class="text-3xl font-bold">"Explore Movies"</h1>
                <div class="flex gap-2">
                    <input
                        type="text"
                        placeholder="Search movies..."
                        class="px-4 py-2 rounded-full bg-[#1c2e3e] text-white focus:outline-none focus:ring-2 focus:ring-[#7cc36e]"
                        prop:value=move || view_state.with(|v| v.query.search.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            view_state.update(|v| v.set_search(value));
                        }
                    />
                    <select
                        class="px-4 py-2 rounded-full bg-[#1c2e3e] text-white"
                        prop:value=move || view_state.with(|v| v.query.sort.as_str())
                        on:change=on_sort
                    >
                        {[SortKey::Title, SortKey::ReleaseDate].into_iter().map(|sort| view! {
                            <option value=sort.as_str()>{sort.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="mb-6">
                <CategoryBar
                    active=Signal::derive(move || view_state.with(|v| v.query.category.clone()))
                    on_select=move |category| view_state.update(|v| v.set_category(category))
                />
            </div>

            {move || {
                let load = load.clone();
                view_state.with(|v| match &v.movies {
                    FetchState::Loading => view! { <Loading /> }.into_view(),
                    FetchState::Error(_) => match v.page_error() {
                        Some(message) => view! { <ErrorRetry message=message on_retry=load /> }.into_view(),
                        // Rejected session: on the way to the login form
                        None => view! { <Loading /> }.into_view(),
                    },
                    FetchState::Success(_) => {
                        if let Some(message) = v.empty_message() {
                            view! {
                                <div class="bg-[#1c2e3e] rounded-lg p-8 text-center">
                                    <h3 class="text-xl font-semibold mb-2">{message}</h3>
                                    <p class="text-gray-400">"Try a different search term or category"</p>
                                </div>
                            }.into_view()
                        } else {
                            view! {
                                <p class="text-gray-400 mb-4">{v.result_label()}</p>
                                <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-5 gap-6">
                                    {v.visible().into_iter().cloned().map(|movie| view! {
                                        <MovieCard movie=movie />
                                    }).collect_view()}
                                </div>
                            }.into_view()
                        }
                    }
                })
            }}
        </div>
    }
}
