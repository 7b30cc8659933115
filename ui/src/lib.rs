//! GreenAyu web frontend
//!
//! Client-side rendered Leptos app. Sessions, the route guard and every
//! feature request go through `greenayu-core`, so the browser applies the
//! same rules as the CLI.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;

use greenayu_core::FeatureKind;
use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};

use components::{Footer, Header, Protected};
use pages::features::{
    FertilizerPage, IdentifyHealthPage, PartsQualityPage, ShelfLifePage, YieldPage,
};
use pages::info::{AboutPage, ContactPage, NotFoundPage, PackagesPage, TermsPage};
use pages::{home::HomePage, login::LoginPage, register::RegisterPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppState::new());

    view! {
        <Router>
            <div class="app-shell">
                <Header />
                <main class="main">
                    <Routes fallback=|| view! { <Redirect path=greenayu_core::routes::NOT_FOUND_PATH /> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/about") view=AboutPage />
                        <Route path=path!("/packages") view=PackagesPage />
                        <Route path=path!("/contact") view=ContactPage />
                        <Route path=path!("/terms") view=TermsPage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />

                        <Route
                            path=path!("/features/identify-health")
                            view=|| view! { <Protected><IdentifyHealthPage /></Protected> }
                        />
                        <Route
                            path=path!("/features/fertilizer")
                            view=|| view! { <Protected><FertilizerPage /></Protected> }
                        />
                        <Route
                            path=path!("/features/yield")
                            view=|| view! { <Protected><YieldPage /></Protected> }
                        />
                        <Route
                            path=path!("/features/shelf-life")
                            view=|| view! { <Protected><ShelfLifePage /></Protected> }
                        />
                        <Route
                            path=path!("/features/parts-quality")
                            view=|| view! { <Protected><PartsQualityPage /></Protected> }
                        />

                        <Route path=path!("/404") view=NotFoundPage />
                    </Routes>
                </main>
                <Footer />
            </div>
        </Router>
    }
}

/// Feature links in navigation order.
pub(crate) fn feature_links() -> impl Iterator<Item = (&'static str, &'static str, &'static str)> {
    FeatureKind::ALL
        .into_iter()
        .map(|kind| (kind.route_path(), kind.label(), kind.description()))
}
