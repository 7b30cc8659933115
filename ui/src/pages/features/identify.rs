use greenayu_core::feature::identify::{IdentifyHealth, IdentifyInput};
use greenayu_core::{FeatureKind, ImageUpload};
use leptos::prelude::*;

use super::{EmptyReport, FeatureShell, Meter};
use crate::components::{ErrorBanner, FeatureForm, ImagePicker, SubmitButton};
use crate::state::AppState;

#[component]
pub fn IdentifyHealthPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let form = FeatureForm::<IdentifyHealth>::new(state.transport());
    let input = RwSignal::new(IdentifyInput::default());

    let edit = move |apply: &dyn Fn(&mut IdentifyInput)| {
        input.update(|i| apply(i));
        form.edited();
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.is_submitting() {
            form.submit(input.get_untracked());
        }
    };

    view! {
        <FeatureShell
            kind=FeatureKind::IdentifyHealth
            subtitle="Upload a leaf or whole-plant photo to identify the species and check its health."
        >
            <form class="card feature-form" on:submit=on_submit>
                <label class="field">
                    <span class="field-label">"Plant name (optional)"</span>
                    <input
                        class="input"
                        placeholder="e.g. Tulsi"
                        prop:value=move || input.with(|i| i.plant_name.clone().unwrap_or_default())
                        on:change=move |ev| {
                            let name = event_target_value(&ev);
                            edit(&|i| i.plant_name = Some(name.clone()).filter(|n| !n.trim().is_empty()));
                        }
                    />
                </label>

                <ImagePicker on_pick=move |upload: Option<ImageUpload>| {
                    edit(&|i| i.image = upload.clone())
                } />

                <ErrorBanner message=Signal::derive(move || form.error()) />
                <SubmitButton
                    label="Analyze Plant"
                    busy_label="Analyzing..."
                    busy=Signal::derive(move || form.is_submitting())
                />
            </form>

            <div class="card report">
                {move || match form.result() {
                    None => view! { <EmptyReport text="Upload a photo to see the diagnosis." /> }.into_any(),
                    Some(r) => {
                        let tone = if r.healthy { "alert alert-success" } else { "alert alert-warning" };
                        view! {
                            <h3>"Diagnosis"</h3>
                            <p class="report-headline">{r.plant.clone()}</p>
                            <p><b>"Category: "</b> {r.category.clone()}</p>
                            <Meter label="Category confidence" percent=r.category_confidence />
                            <p><b>"Health: "</b> {r.health.clone()}</p>
                            <Meter label="Health confidence" percent=r.health_confidence />
                            <Meter label="Overall confidence" percent=r.confidence />
                            <div class=tone>{r.recommendation.clone()}</div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </FeatureShell>
    }
}
