//! Registration page
//!
//! There is no account backend yet: a valid submission just waits a moment
//! and sends the user to sign in with the demo account.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::Page;
use crate::components::{ErrorBanner, SubmitButton};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let agreed = RwSignal::new(false);
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !agreed.get_untracked() {
            error.set(Some("Please agree to the Terms of Service".to_string()));
            return;
        }

        error.set(None);
        is_loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            TimeoutFuture::new(1_000).await;
            is_loading.set(false);
            navigate("/login", Default::default());
        });
    };

    view! {
        <Page title="Join GreenAyu" subtitle="Start your medicinal plant optimization journey">
            <div class="auth-card">
                <ErrorBanner message=error />

                <form on:submit=on_submit class="auth-form">
                    <label class="field">
                        <span class="field-label">"Full Name"</span>
                        <input
                            class="input"
                            placeholder="John Doe"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                            required=true
                        />
                    </label>

                    <label class="field">
                        <span class="field-label">"Email Address"</span>
                        <input
                            type="email"
                            class="input"
                            placeholder="john@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            required=true
                        />
                    </label>

                    <label class="field">
                        <span class="field-label">"Password"</span>
                        <input
                            type="password"
                            class="input"
                            placeholder="Min. 8 characters"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required=true
                        />
                    </label>

                    <label class="field field-toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || agreed.get()
                            on:change=move |ev| agreed.set(event_target_checked(&ev))
                        />
                        <span>"I agree to the " <a href="/terms" class="auth-link">"Terms of Service"</a></span>
                    </label>

                    <SubmitButton
                        label="Create Free Account"
                        busy_label="Creating Account..."
                        busy=is_loading
                    />
                </form>

                <p class="auth-footer">
                    "Already a member? " <a href="/login" class="auth-link">"Sign In here"</a>
                </p>
            </div>
        </Page>
    }
}
