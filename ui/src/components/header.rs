//! Site header and footer

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::feature_links;
use crate::state::AppState;

const NAV: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/packages", "Packages"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

/// Main application header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let show_features = RwSignal::new(false);
    let session = state.session;

    let user_label = Signal::derive(move || {
        session
            .get()
            .map(|s| if s.name.is_empty() { s.email } else { s.name })
            .unwrap_or_else(|| "Account".to_string())
    });

    view! {
        <header class="header">
            <div class="header-inner">
                <a href="/" class="brand">
                    <span class="brand-name">"GreenAyu"</span>
                </a>

                <nav class="nav">
                    {NAV
                        .into_iter()
                        .map(|(to, label)| view! { <a href=to class="nav-link">{label}</a> })
                        .collect_view()}

                    <div
                        class="nav-dropdown"
                        on:mouseenter=move |_| show_features.set(true)
                        on:mouseleave=move |_| show_features.set(false)
                    >
                        <button class="nav-link">"Features ▾"</button>
                        <Show when=move || show_features.get()>
                            <div class="dropdown-menu">
                                {feature_links()
                                    .map(|(to, label, desc)| {
                                        view! {
                                            <a href=to class="dropdown-item">
                                                <span class="dropdown-label">{label}</span>
                                                <span class="dropdown-desc">{desc}</span>
                                            </a>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </Show>
                    </div>
                </nav>

                {move || {
                    if state.is_authenticated() {
                        let state = state.clone();
                        let navigate = navigate.clone();
                        view! {
                            <div class="auth-actions">
                                <span class="user-label">{user_label}</span>
                                <button
                                    on:click=move |_| {
                                        state.logout();
                                        navigate("/", Default::default());
                                    }
                                    class="btn btn-ghost"
                                >
                                    "Sign Out"
                                </button>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <div class="auth-actions">
                                <a href="/login" class="btn btn-ghost">"Sign In"</a>
                                <a href="/register" class="btn btn-primary">"Get Started"</a>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="footer-inner">
                <div>
                    <p class="brand-name">"GreenAyu"</p>
                    <p class="muted">"AI-assisted care for Ayurvedic medicinal plants."</p>
                </div>
                <div class="footer-links">
                    <a href="/about">"About"</a>
                    <a href="/packages">"Packages"</a>
                    <a href="/contact">"Contact"</a>
                    <a href="/terms">"Terms"</a>
                </div>
                <p class="muted">"© GreenAyu"</p>
            </div>
        </footer>
    }
}
