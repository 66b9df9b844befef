//! Navigation Component
//!
//! Header bar with the brand, the current user and logout.

use leptos::*;
use leptos_router::*;

use movie_reviews::views;

use crate::state::AppState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let navigate = use_navigate();

    let on_logout = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            let state = state.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let next = views::sign_out(&state.api, &state.ctx).await;
                state.sync();
                navigate(&next.path(), Default::default());
            });
        }
    };

    view! {
        <nav class="bg-[#14202c] shadow-lg sticky top-0 z-10">
            <div class="container mx-auto px-4 py-3 flex items-center justify-between">
                <A href="/" class="flex items-center space-x-2">
                    <span class="text-2xl">"🎬"</span>
                    <span class="text-xl font-bold text-[#7cc36e]">"MovieReviews"</span>
                </A>

                {move || match state.user_name() {
                    Some(name) => {
                        let on_logout = on_logout.clone();
                        view! {
                            <div class="flex items-center space-x-4">
                                <A href="/movies" class="text-gray-300 hover:text-white">"Movies"</A>
                                <span class="text-gray-400">{name}</span>
                                <button
                                    class="px-4 py-2 bg-[#7cc36e] hover:bg-[#6aad5d] rounded-md"
                                    on:click=on_logout
                                >
                                    "Logout"
                                </button>
                            </div>
                        }.into_view()
                    }
                    None => view! {
                        <A href="/login" class="px-4 py-2 bg-[#7cc36e] hover:bg-[#6aad5d] rounded-md">
                            "Sign In"
                        </A>
                    }.into_view(),
                }}
            </div>
        </nav>
    }
}
