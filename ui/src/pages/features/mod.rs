//! The five protected feature pages.

mod fertilizer;
mod identify;
mod parts;
mod shelf_life;
mod yield_forecast;

pub use fertilizer::FertilizerPage;
pub use identify::IdentifyHealthPage;
pub use parts::PartsQualityPage;
pub use shelf_life::ShelfLifePage;
pub use yield_forecast::YieldPage;

use greenayu_core::FeatureKind;
use leptos::prelude::*;
use leptos_meta::Title;

use crate::api::default_base_url;

/// Two-column feature layout: the form on the left, the report on the right.
#[component]
fn FeatureShell(kind: FeatureKind, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <Title text=format!("{} | GreenAyu", kind.label()) />
        <section class="page feature-page">
            <div class="page-head">
                <p class="badge">{kind.description()}</p>
                <h1 class="page-title">{kind.label()}</h1>
                <p class="page-subtitle">{subtitle}</p>
            </div>
            <div class="feature-layout">{children()}</div>
            <p class="endpoint muted">"API: " {format!("{}{}", default_base_url(), kind.endpoint())}</p>
        </section>
    }
}

/// Percentage with a bar.
#[component]
fn Meter(label: &'static str, percent: u32) -> impl IntoView {
    let tone = match percent {
        70.. => "meter-good",
        40..=69 => "meter-fair",
        _ => "meter-poor",
    };
    view! {
        <div class="meter">
            <div class="meter-head">
                <span>{label}</span>
                <span class="meter-value">{format!("{}%", percent)}</span>
            </div>
            <div class="meter-track">
                <div class=format!("meter-fill {}", tone) style=format!("width: {}%", percent.min(100))></div>
            </div>
        </div>
    }
}

/// Placeholder shown in the report column before any result.
#[component]
fn EmptyReport(text: &'static str) -> impl IntoView {
    view! {
        <div class="report-empty">
            <p class="muted">{text}</p>
        </div>
    }
}
