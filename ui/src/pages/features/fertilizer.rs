use greenayu_core::feature::fertilizer::{Fertilizer, FertilizerInput};
use greenayu_core::feature::options::{CropType, SoilType};
use greenayu_core::FeatureKind;
use leptos::prelude::*;

use super::{EmptyReport, FeatureShell};
use crate::components::form::choices;
use crate::components::{ErrorBanner, FeatureForm, NumberField, SelectField, SubmitButton};
use crate::state::AppState;

#[component]
pub fn FertilizerPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let form = FeatureForm::<Fertilizer>::new(state.transport());
    let input = RwSignal::new(FertilizerInput::default());

    let edit = move |apply: &dyn Fn(&mut FertilizerInput)| {
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
            kind=FeatureKind::Fertilizer
            subtitle="Get a fertilizer recommendation from soil nutrients and field climate."
        >
            <form class="card feature-form" on:submit=on_submit>
                <label class="field">
                    <span class="field-label">"Plant name (optional)"</span>
                    <input
                        class="input"
                        placeholder="e.g. Iramusu"
                        prop:value=move || input.with(|i| i.plant.clone().unwrap_or_default())
                        on:change=move |ev| {
                            let name = event_target_value(&ev);
                            edit(&|i| i.plant = Some(name.clone()).filter(|n| !n.trim().is_empty()));
                        }
                    />
                </label>

                <h4 class="form-section">"Climate"</h4>
                <div class="field-grid">
                    <NumberField
                        label="Temperature (°C)"
                        value=Signal::derive(move || input.with(|i| i.temperature))
                        on_change=move |v: f64| edit(&|i| i.temperature = v)
                    />
                    <NumberField
                        label="Humidity (%)"
                        value=Signal::derive(move || input.with(|i| i.humidity))
                        on_change=move |v: f64| edit(&|i| i.humidity = v)
                    />
                    <NumberField
                        label="Moisture (%)"
                        value=Signal::derive(move || input.with(|i| i.moisture))
                        on_change=move |v: f64| edit(&|i| i.moisture = v)
                    />
                </div>

                <h4 class="form-section">"Soil nutrients"</h4>
                <div class="field-grid">
                    <NumberField
                        label="Nitrogen (N)"
                        value=Signal::derive(move || input.with(|i| i.nitrogen))
                        on_change=move |v: f64| edit(&|i| i.nitrogen = v)
                    />
                    <NumberField
                        label="Phosphorous (P)"
                        value=Signal::derive(move || input.with(|i| i.phosphorous))
                        on_change=move |v: f64| edit(&|i| i.phosphorous = v)
                    />
                    <NumberField
                        label="Potassium (K)"
                        value=Signal::derive(move || input.with(|i| i.potassium))
                        on_change=move |v: f64| edit(&|i| i.potassium = v)
                    />
                </div>

                <div class="field-grid">
                    <SelectField
                        label="Soil type"
                        options=choices!(SoilType)
                        value=Signal::derive(move || input.with(|i| i.soil_type.to_string()))
                        on_change=move |v: String| {
                            if let Ok(soil) = v.parse::<SoilType>() {
                                edit(&|i| i.soil_type = soil);
                            }
                        }
                    />
                    <SelectField
                        label="Crop type"
                        options=choices!(CropType)
                        value=Signal::derive(move || input.with(|i| i.crop_type.to_string()))
                        on_change=move |v: String| {
                            if let Ok(crop) = v.parse::<CropType>() {
                                edit(&|i| i.crop_type = crop);
                            }
                        }
                    />
                </div>

                <ErrorBanner message=Signal::derive(move || form.error()) />
                <SubmitButton
                    label="Get Recommendation"
                    busy_label="Analyzing..."
                    busy=Signal::derive(move || form.is_submitting())
                />
            </form>

            <div class="card report">
                {move || match form.result() {
                    None => view! { <EmptyReport text="Enter field readings to get a fertilizer mix." /> }.into_any(),
                    Some(r) => view! {
                        <h3>"Recommended Fertilizer"</h3>
                        <p class="muted">{r.plant.clone()}</p>
                        <p class="report-headline">{r.recommended_fertilizer.clone()}</p>
                        <p><b>"Soil & crop: "</b> {r.soil_and_crop()}</p>
                        <p><b>"Nutrients: "</b> {r.npk()}</p>
                        <p>
                            <b>"Climate: "</b>
                            {format!(
                                "{}°C, {}% humidity, {}% moisture",
                                r.inputs.temperature,
                                r.inputs.humidity,
                                r.inputs.moisture,
                            )}
                        </p>
                        <p class="note">{r.note.clone()}</p>
                    }
                        .into_any(),
                }}
            </div>
        </FeatureShell>
    }
}
