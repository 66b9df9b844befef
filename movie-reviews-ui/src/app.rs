//! App Root Component
//!
//! Main application component with routing, the route guard and global
//! providers.

use leptos::*;
use leptos_router::*;

use movie_reviews::guard::{decide, Access, Route as AppRoute};

use crate::components::{Nav, Toast};
use crate::pages::{Home, Login, MovieDetail, Movies};
use crate::state::{provide_app_state, AppState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_app_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gradient-to-b from-[#0a141f] to-[#162536] text-white flex flex-col">
                <Nav />

                <main class="flex-1">
                    <Routes>
                        <Route path="/" view=|| view! { <Guard><Home /></Guard> } />
                        <Route path="/login" view=|| view! { <Guard><Login /></Guard> } />
                        <Route path="/movies" view=|| view! { <Guard><Movies /></Guard> } />
                        <Route path="/movie/:id" view=|| view! { <Guard><MovieDetail /></Guard> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// Renders its children or redirects, per the shared guard.
///
/// Re-evaluated on navigation and whenever the session signal changes.
#[component]
fn Guard(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let location = use_location();

    move || {
        let route = AppRoute::parse(&location.pathname.get());
        match decide(&route, state.is_signed_in()) {
            Access::Render => children().into_view(),
            Access::Redirect(target) => view! { <Redirect path=target.path() /> }.into_view(),
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-[#7cc36e] hover:bg-[#6aad5d] rounded-md font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
