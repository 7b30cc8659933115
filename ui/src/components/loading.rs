//! Busy indicator for submit buttons

use leptos::prelude::*;

/// Inline ring spinner, sized by the surrounding font.
#[component]
pub fn LoadingSpinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <span class="spinner" role="status" aria-label=label.unwrap_or("Loading")>
            <span class="spinner-ring"></span>
        </span>
    }
}
