//! Sign-in page

use greenayu_core::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use super::Page;
use crate::components::{ErrorBanner, SubmitButton};
use crate::state::AppState;

/// Sign-in form, pre-filled with the demo account.
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let search = use_location().search;

    let email = RwSignal::new(DEMO_EMAIL.to_string());
    let password = RwSignal::new(DEMO_PASSWORD.to_string());
    let show_password = RwSignal::new(false);
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    // Already signed in: go straight on.
    let navigate_for_redirect = navigate.clone();
    let state_for_redirect = state.clone();
    Effect::new(move |_| {
        if state_for_redirect.is_authenticated() {
            let target = state_for_redirect.return_target(&search.get_untracked());
            navigate_for_redirect(&target, Default::default());
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let state = state.clone();
        let navigate = navigate.clone();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let query = search.get_untracked();

        spawn_local(async move {
            is_loading.set(true);
            error.set(None);

            let result = state.login(&email_val, &password_val).await;
            is_loading.set(false);

            match result {
                Ok(_) => navigate(&state.return_target(&query), Default::default()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <Page title="Welcome Back" subtitle="Access your GreenAyu diagnostic dashboard">
            <div class="auth-card">
                <div class="hint-box">
                    "Demo: " <b>{DEMO_EMAIL}</b> " / " <b>{DEMO_PASSWORD}</b>
                </div>

                <ErrorBanner message=error />

                <form on:submit=on_submit class="auth-form">
                    <label class="field">
                        <span class="field-label">"Email Address"</span>
                        <input
                            type="email"
                            class="input"
                            placeholder="name@company.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required=true
                        />
                    </label>

                    <label class="field">
                        <span class="field-label">"Password"</span>
                        <div class="input-row">
                            <input
                                type=move || if show_password.get() { "text" } else { "password" }
                                class="input"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                required=true
                            />
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| show_password.update(|v| *v = !*v)
                            >
                                {move || if show_password.get() { "Hide" } else { "Show" }}
                            </button>
                        </div>
                    </label>

                    <SubmitButton label="Sign In" busy_label="Signing in..." busy=is_loading />
                </form>

                <p class="auth-footer">
                    "New to GreenAyu? " <a href="/register" class="auth-link">"Create an account"</a>
                </p>
            </div>
        </Page>
    }
}
