//! Landing page

use leptos::prelude::*;
use leptos_meta::Title;

use crate::feature_links;
use crate::state::AppState;

const STATS: [(&str, &str); 4] = [
    ("5", "AI diagnostic modules"),
    ("10MB", "Max image upload"),
    ("JPG / PNG / WEBP", "Supported formats"),
    ("24/7", "Field access"),
];

const STEPS: [(&str, &str); 3] = [
    ("Sign in", "Use the demo account to open the diagnostic dashboard."),
    ("Submit a sample", "Upload a photo or enter field readings for the module you need."),
    ("Act on the report", "Get confidence scores, risk levels and handling advice."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<AppState>().session;
    let cta = move || {
        if session.with(|s| s.is_some()) {
            ("/features/identify-health", "Open Dashboard")
        } else {
            ("/login", "Start Diagnosing")
        }
    };

    view! {
        <Title text="GreenAyu | Medicinal plant intelligence" />
        <section class="hero">
            <p class="badge">"AI for Ayurvedic agriculture"</p>
            <h1 class="hero-title">"Grow, grade and preserve medicinal plants with confidence."</h1>
            <p class="hero-subtitle">
                "GreenAyu identifies species, spots disease, recommends fertilizer, forecasts yield, "
                "predicts shelf life and grades plant parts from a single portal."
            </p>
            <div class="hero-actions">
                <a href=move || cta().0 class="btn btn-primary">{move || cta().1}</a>
                <a href="/packages" class="btn btn-ghost">"View Packages"</a>
            </div>
        </section>

        <section class="stats-strip">
            {STATS
                .into_iter()
                .map(|(value, label)| {
                    view! {
                        <div class="stat">
                            <span class="stat-value">{value}</span>
                            <span class="stat-label">{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </section>

        <section class="feature-grid">
            {feature_links()
                .map(|(to, label, desc)| {
                    view! {
                        <a href=to class="card feature-card">
                            <h3>{label}</h3>
                            <p class="muted">{desc}</p>
                        </a>
                    }
                })
                .collect_view()}
        </section>

        <section class="how-it-works">
            <h2>"How it works"</h2>
            <ol class="steps">
                {STEPS
                    .into_iter()
                    .map(|(title, text)| view! { <li><b>{title}</b> " " {text}</li> })
                    .collect_view()}
            </ol>
        </section>
    }
}
