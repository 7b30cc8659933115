//! Route guard wrapper for feature pages.

use greenayu_core::Access;
use leptos::prelude::*;
use leptos_router::{components::Redirect, hooks::use_location};

use crate::state::AppState;

/// Renders `children` only with a session; otherwise redirects to sign-in.
///
/// Re-evaluates when the session changes, so signing out on a feature page
/// leaves it immediately.
#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();
    let location = use_location();

    move || match state.authorize(&location.pathname.get()) {
        Access::Allow => children().into_any(),
        Access::Redirect { to } => view! { <Redirect path=to /> }.into_any(),
    }
}
