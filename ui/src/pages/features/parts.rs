use greenayu_core::feature::options::PlantPart;
use greenayu_core::feature::parts::{PartsInput, PartsQuality, GRADING_PENDING};
use greenayu_core::{FeatureKind, ImageUpload};
use leptos::prelude::*;

use super::{EmptyReport, FeatureShell, Meter};
use crate::components::form::choices;
use crate::components::{ErrorBanner, FeatureForm, ImagePicker, SelectField, SubmitButton};
use crate::state::AppState;

#[component]
pub fn PartsQualityPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let form = FeatureForm::<PartsQuality>::new(state.transport());
    let input = RwSignal::new(PartsInput::default());

    let edit = move |apply: &dyn Fn(&mut PartsInput)| {
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
            kind=FeatureKind::PartsQuality
            subtitle="Detect which plant part a specimen photo shows before quality grading."
        >
            <form class="card feature-form" on:submit=on_submit>
                <SelectField
                    label="Expected part"
                    options=choices!(PlantPart)
                    value=Signal::derive(move || input.with(|i| i.part.to_string()))
                    on_change=move |v: String| {
                        if let Ok(part) = v.parse::<PlantPart>() {
                            edit(&|i| i.part = part);
                        }
                    }
                />

                <ImagePicker on_pick=move |upload: Option<ImageUpload>| {
                    edit(&|i| i.image = upload.clone())
                } />

                <ErrorBanner message=Signal::derive(move || form.error()) />
                <SubmitButton
                    label="Grade Specimen"
                    busy_label="Grading..."
                    busy=Signal::derive(move || form.is_submitting())
                />
            </form>

            <div class="card report">
                {move || match form.result() {
                    None => view! { <EmptyReport text="Upload a specimen photo to start grading." /> }.into_any(),
                    Some(r) => {
                        let (tone, verdict) = if r.matches_selection() {
                            ("alert alert-success", "Detected part matches the selection")
                        } else {
                            ("alert alert-warning", "Detected part differs from the selection")
                        };
                        view! {
                            <h3>"Quality Grade"</h3>
                            <p><b>"Selected: "</b> {r.selected_part.clone()}</p>
                            <p class="report-headline">{r.detected_part.clone()}</p>
                            <Meter label="Detection confidence" percent=r.confidence />
                            <div class=tone>{verdict}</div>
                            <dl class="grading">
                                <dt>"Quality"</dt>
                                <dd>{r.quality.clone().unwrap_or_else(|| GRADING_PENDING.to_string())}</dd>
                                <dt>"Defects"</dt>
                                <dd>{r.defects.clone().unwrap_or_else(|| GRADING_PENDING.to_string())}</dd>
                                <dt>"Purity"</dt>
                                <dd>{r.purity.clone().unwrap_or_else(|| GRADING_PENDING.to_string())}</dd>
                            </dl>
                            <p class="note">{r.note.clone()}</p>
                        }
                            .into_any()
                    }
                }}
            </div>
        </FeatureShell>
    }
}
