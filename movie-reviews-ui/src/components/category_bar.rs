//! Category filter buttons

use leptos::*;

use movie_reviews::catalog::Category;

/// One button per category; the active one is highlighted
#[component]
pub fn CategoryBar(
    #[prop(into)]
    active: Signal<Category>,
    on_select: impl Fn(Category) + 'static + Clone,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-2">
            {Category::all().into_iter().map(|category| {
                let on_select = on_select.clone();
                let label = category.label().to_string();
                let this = category.clone();
                let class = move || {
                    if active.get() == this {
                        "px-4 py-2 rounded-full bg-[#7cc36e] text-white"
                    } else {
                        "px-4 py-2 rounded-full bg-[#1c2e3e] text-gray-300 hover:bg-[#263d52]"
                    }
                };
                view! {
                    <button class=class on:click=move |_| on_select(category.clone())>
                        {label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
