//! Login Page
//!
//! Login and registration forms on one page, driven by the shared
//! [`AuthForm`] state machine.

use leptos::*;
use leptos_router::*;

use movie_reviews::guard::Route;
use movie_reviews::views::auth::{AuthForm, AuthMode, AuthRequest, Field};
use movie_reviews::MovieApi;

use crate::components::ErrorBanner;
use crate::state::AppState;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let navigate = use_navigate();
    let form = create_rw_signal(AuthForm::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Some(request) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match &request {
                AuthRequest::Login(req) => state.api.login(req).await,
                AuthRequest::Signup(req) => state.api.signup(req).await,
            };
            form.update(|f| f.finish(&result));

            match result {
                Ok(user) => {
                    state.sign_in(user);
                    navigate(&Route::Movies.path(), Default::default());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Authentication error: {}", e).into());
                }
            }
        });
    };

    let is_login = move || form.with(|f| f.mode == AuthMode::Login);

    view! {
        <div class="min-h-[80vh] flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-[#14202c] rounded-xl shadow-2xl p-8">
                <h2 class="text-3xl font-bold text-center mb-2">{move || form.with(|f| f.title())}</h2>
                <p class="text-gray-400 text-center mb-6">
                    {move || if is_login() { "Sign in to continue to MovieReviews" } else { "Join the MovieReviews community" }}
                </p>

                <ErrorBanner
                    message=Signal::derive(move || form.with(|f| f.error.clone()))
                    on_dismiss=move || form.update(|f| f.error = None)
                />
                {move || form.with(|f| f.success.clone()).map(|msg| view! {
                    <div class="bg-green-500/20 border border-green-500 text-green-300 px-4 py-3 rounded-md mb-4">{msg}</div>
                })}

                <form on:submit=on_submit class="space-y-4">
                    {move || {
                        if is_login() {
                            view! {
                                <FormField label="User ID (Email or Mobile)" field=Field::UserId form=form />
                                <FormField label="Password" field=Field::Password kind="password" form=form />
                            }.into_view()
                        } else {
                            view! {
                                <FormField label="Full Name" field=Field::Name form=form />
                                <FormField label="Mobile Number" field=Field::Mobile kind="tel" form=form />
                                <FormField label="Email" field=Field::Email kind="email" form=form />
                                <FormField label="Password" field=Field::Password kind="password" form=form />
                                <FormField label="Confirm Password" field=Field::ConfirmPassword kind="password" form=form />
                            }.into_view()
                        }
                    }}

                    <button
                        type="submit"
                        class="w-full py-3 bg-[#7cc36e] hover:bg-[#6aad5d] rounded-md font-bold disabled:opacity-50"
                        disabled=move || form.with(|f| f.loading)
                    >
                        {move || form.with(|f| f.submit_label())}
                    </button>
                </form>

                <p class="text-center text-gray-400 mt-6">
                    {move || if is_login() { "Don't have an account? " } else { "Already have an account? " }}
                    <button class="text-[#7cc36e] hover:underline" on:click=move |_| form.update(|f| f.switch_mode())>
                        {move || if is_login() { "Sign Up" } else { "Sign In" }}
                    </button>
                </p>
            </div>
        </div>
    }
}

/// Labelled input bound to one form field
#[component]
fn FormField(
    label: &'static str,
    field: Field,
    #[prop(default = "text")]
    kind: &'static str,
    form: RwSignal<AuthForm>,
) -> impl IntoView {
    let value = move || {
        form.with(|f| match field {
            Field::UserId => f.user_id.clone(),
            Field::Name => f.name.clone(),
            Field::Mobile => f.mobile.clone(),
            Field::Email => f.email.clone(),
            Field::Password => f.password.clone(),
            Field::ConfirmPassword => f.confirm_password.clone(),
        })
    };

    view! {
        <div>
            <label class="block text-sm text-gray-300 mb-1">{label}</label>
            <input
                type=kind
                class="w-full px-4 py-2 rounded-md bg-[#1c2e3e] text-white focus:outline-none focus:ring-2 focus:ring-[#7cc36e]"
                prop:value=value
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.set_field(field, value));
                }
            />
        </div>
    }
}
