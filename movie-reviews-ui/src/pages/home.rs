//! Home Page
//!
//! Landing page for anonymous visitors: hero card, featured movies and a
//! call to create an account.

use leptos::*;
use leptos_router::*;

use movie_reviews::views::home::HomeView;
use movie_reviews::MovieApi;

use crate::components::{CategoryBar, Loading, MovieCard};
use crate::state::AppState;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let home = create_rw_signal(HomeView::new());

    // Fetch featured movies on mount
    let api = state.api.clone();
    create_effect(move |_| {
        let api = api.clone();
        spawn_local(async move {
            let result = api.list_movies().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching featured movies: {}", e).into());
            }
            home.update(|h| h.apply(result));
        });
    });

    let cta = home.with_untracked(|h| h.call_to_action().path());

    view! {
        <div class="container mx-auto px-4 py-12 space-y-12">
            // Hero
            <section class="grid md:grid-cols-2 gap-8 items-center">
                <div>
                    <h1 class="text-5xl font-bold mb-4">"Discover & Review "<span class="text-[#7cc36e]">"Movies"</span></h1>
                    <p class="text-gray-300 text-lg mb-6">
                        "Join our community of movie lovers. Share your thoughts and find your next favorite film."
                    </p>
                    <A href=cta.clone() class="bg-[#7cc36e] hover:bg-[#6aad5d] px-6 py-3 rounded-full font-bold">
                        "Get Started"
                    </A>
                </div>
                <div class="relative rounded-xl overflow-hidden shadow-2xl h-96">
                    {move || {
                        if home.with(|h| h.loading) {
                            view! { <Loading /> }.into_view()
                        } else {
                            let hero = home.with(|h| h.hero());
                            view! {
                                <img src=hero.poster alt="Featured Movie" class="w-full h-full object-cover" />
                                <div class="absolute bottom-0 left-0 right-0 p-6 bg-gradient-to-t from-black/80">
                                    <h3 class="text-xl font-bold">{hero.title}</h3>
                                    <p class="text-gray-400">{hero.blurb}</p>
                                </div>
                            }.into_view()
                        }
                    }}
                </div>
            </section>

            // Search and categories
            <section class="space-y-4">
                <input
                    type="text"
                    placeholder="Search movies..."
                    class="w-full md:w-1/2 px-4 py-2 rounded-full bg-[#1c2e3e] text-white focus:outline-none focus:ring-2 focus:ring-[#7cc36e]"
                    prop:value=move || home.with(|h| h.query.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        home.update(|h| h.set_search(value));
                    }
                />
                <CategoryBar
                    active=Signal::derive(move || home.with(|h| h.query.category.clone()))
                    on_select=move |category| home.update(|h| h.set_category(category))
                />
            </section>

            // Featured row
            <section>
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-2xl font-bold">"Featured Movies"</h2>
                    <A href=cta.clone() class="text-[#7cc36e] hover:underline">"View All"</A>
                </div>
                {move || home.with(|h| {
                    if h.loading {
                        view! { <Loading /> }.into_view()
                    } else if let Some(message) = h.empty_message() {
                        view! {
                            <div class="bg-[#1c2e3e] rounded-lg p-8 text-center">
                                <h3 class="text-xl font-semibold mb-2">{message}</h3>
                                <p class="text-gray-400">"Try a different search term or category"</p>
                            </div>
                        }.into_view()
                    } else {
                        let href = h.call_to_action().path();
                        view! {
                            <div class="overflow-x-auto pb-4">
                                <div class="flex space-x-4 w-max">
                                    {h.visible().into_iter().cloned().map(|movie| view! {
                                        <div class="w-48">
                                            <MovieCard movie=movie href=href.clone() />
                                        </div>
                                    }).collect_view()}
                                </div>
                            </div>
                        }.into_view()
                    }
                })}
            </section>

            // Join banner
            <section class="bg-[#14202c] rounded-xl p-12 text-center">
                <h2 class="text-3xl font-bold mb-4">"Ready to Share Your Opinion?"</h2>
                <p class="text-gray-300 text-lg mb-8">
                    "Join thousands of movie enthusiasts who are creating and exploring reviews every day."
                </p>
                <A href=cta class="bg-[#7cc36e] hover:bg-[#6aad5d] px-8 py-4 rounded-full font-bold text-lg">
                    "Create Your Account"
                </A>
            </section>
        </div>
    }
}
