//! Page components, one per route.

pub mod features;
pub mod home;
pub mod info;
pub mod login;
pub mod register;

use leptos::prelude::*;
use leptos_meta::Title;

/// Shared page chrome: document title, heading and subtitle.
#[component]
pub fn Page(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <Title text=format!("{} | GreenAyu", title) />
        <section class="page">
            <div class="page-head">
                <h1 class="page-title">{title}</h1>
                <p class="page-subtitle">{subtitle}</p>
            </div>
            {children()}
        </section>
    }
}
