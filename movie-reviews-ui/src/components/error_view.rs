//! Error presentation
//!
//! Full-page errors replace a view; banners sit next to the control that
//! failed and can be dismissed.

use leptos::*;
use leptos_router::*;

/// Whole-page error with a way back
#[component]
pub fn ErrorPage(
    #[prop(into)]
    message: String,
    back_href: String,
    #[prop(default = "Back to Movies")]
    back_label: &'static str,
) -> impl IntoView {
    view! {
        <div class="min-h-[60vh] flex flex-col items-center justify-center p-4">
            <div class="text-red-400 text-xl mb-4">{message}</div>
            <A
                href=back_href
                class="px-4 py-2 bg-[#7cc36e] text-white rounded-md hover:bg-[#6aad5d] transition-colors"
            >
                {back_label}
            </A>
        </div>
    }
}

/// Whole-page error whose action runs the failed request again
#[component]
pub fn ErrorRetry(
    #[prop(into)]
    message: String,
    on_retry: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <div class="min-h-[60vh] flex flex-col items-center justify-center p-4">
            <div class="text-red-400 text-xl mb-4">{message}</div>
            <button
                class="px-4 py-2 bg-[#7cc36e] text-white rounded-md hover:bg-[#6aad5d] transition-colors"
                on:click=move |_| on_retry()
            >
                "Try Again"
            </button>
        </div>
    }
}

/// Inline dismissible error banner
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: Signal<Option<String>>,
    on_dismiss: impl Fn() + 'static + Clone,
) -> impl IntoView {
    move || {
        let on_dismiss = on_dismiss.clone();
        message.get().map(|msg| view! {
            <div class="bg-red-500/20 border border-red-500 text-red-300 px-4 py-3 rounded-md flex justify-between items-start mb-4">
                <span>{msg}</span>
                <button class="ml-4 text-red-300 hover:text-white" on:click=move |_| on_dismiss()>
                    "✕"
                </button>
            </div>
        })
    }
}
