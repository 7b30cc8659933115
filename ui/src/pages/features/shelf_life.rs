use greenayu_core::feature::options::{PlantPart, StorageType};
use greenayu_core::feature::shelf_life::{RiskLevel, ShelfLife, ShelfLifeInput};
use greenayu_core::FeatureKind;
use leptos::prelude::*;

use super::{EmptyReport, FeatureShell};
use crate::components::form::choices;
use crate::components::{ErrorBanner, FeatureForm, NumberField, SelectField, SubmitButton};
use crate::state::AppState;

#[component]
pub fn ShelfLifePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let form = FeatureForm::<ShelfLife>::new(state.transport());
    let input = RwSignal::new(ShelfLifeInput::default());

    let edit = move |apply: &dyn Fn(&mut ShelfLifeInput)| {
        input.update(|i| apply(i));
        form.edited();
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.is_submitting() {
            form.submit(input.get_untracked());
        }
    };

    let risk_score = move || input.with(|i| i.risk_score());

    view! {
        <FeatureShell
            kind=FeatureKind::ShelfLife
            subtitle="Predict how long harvested material keeps its potency under your storage conditions."
        >
            <form class="card feature-form" on:submit=on_submit>
                <label class="field">
                    <span class="field-label">"Plant name (optional)"</span>
                    <input
                        class="input"
                        placeholder="e.g. Gotukola"
                        prop:value=move || input.with(|i| i.plant.clone().unwrap_or_default())
                        on:change=move |ev| {
                            let name = event_target_value(&ev);
                            edit(&|i| i.plant = Some(name.clone()).filter(|n| !n.trim().is_empty()));
                        }
                    />
                </label>

                <SelectField
                    label="Plant part"
                    options=choices!(PlantPart)
                    value=Signal::derive(move || input.with(|i| i.plant_type.to_string()))
                    on_change=move |v: String| {
                        if let Ok(part) = v.parse::<PlantPart>() {
                            edit(&|i| i.plant_type = part);
                        }
                    }
                />

                <div class="preset-row">
                    {StorageType::ALL
                        .iter()
                        .copied()
                        .map(|storage| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if input.with(|i| i.storage_type == storage) {
                                            "preset preset-active"
                                        } else {
                                            "preset"
                                        }
                                    }
                                    on:click=move |_| edit(&|i| i.apply_storage_preset(storage))
                                >
                                    <span class="preset-label">{storage.label()}</span>
                                    <span class="preset-desc">{storage.description()}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="field-grid">
                    <NumberField
                        label="Temperature (°C)"
                        value=Signal::derive(move || input.with(|i| i.temperature_c))
                        on_change=move |v: f64| edit(&|i| i.temperature_c = v)
                    />
                    <NumberField
                        label="Humidity (%)"
                        value=Signal::derive(move || input.with(|i| i.humidity_percent))
                        on_change=move |v: f64| edit(&|i| i.humidity_percent = v)
                    />
                    <NumberField
                        label="Respiration rate"
                        value=Signal::derive(move || input.with(|i| i.respiration_rate))
                        on_change=move |v: f64| edit(&|i| i.respiration_rate = v)
                        hint="mg CO₂/kg·h"
                    />
                    <NumberField
                        label="Ethylene sensitivity"
                        value=Signal::derive(move || input.with(|i| i.ethylene_sensitivity))
                        on_change=move |v: f64| edit(&|i| i.ethylene_sensitivity = v)
                        step="0.01"
                        hint="0 - 1"
                    />
                    <NumberField
                        label="Water content (%)"
                        value=Signal::derive(move || input.with(|i| i.water_content))
                        on_change=move |v: f64| edit(&|i| i.water_content = v)
                    />
                    <NumberField
                        label="Damage level"
                        value=Signal::derive(move || input.with(|i| i.damage_level))
                        on_change=move |v: f64| edit(&|i| i.damage_level = v)
                        step="0.01"
                        hint="0 - 1"
                    />
                    <NumberField
                        label="Microbial risk"
                        value=Signal::derive(move || input.with(|i| i.microbial_risk))
                        on_change=move |v: f64| edit(&|i| i.microbial_risk = v)
                        step="0.01"
                        hint="0 - 1"
                    />
                </div>

                <p class="muted">
                    "Current risk score: " {move || format!("{:.2}", risk_score())}
                </p>

                <ErrorBanner message=Signal::derive(move || form.error()) />
                <SubmitButton
                    label="Predict Shelf Life"
                    busy_label="Analyzing..."
                    busy=Signal::derive(move || form.is_submitting())
                />
            </form>

            <div class="card report">
                {move || match form.result() {
                    None => view! { <EmptyReport text="Run an analysis to see the stability report." /> }.into_any(),
                    Some(r) => {
                        let badge = match r.risk_level {
                            RiskLevel::Low => "badge badge-good",
                            RiskLevel::Moderate => "badge badge-fair",
                            RiskLevel::High => "badge badge-poor",
                        };
                        view! {
                            <h3>"Stability Analysis"</h3>
                            <p class="muted">
                                {r.plant.clone()} " • " {r.plant_type.label()} " • " {r.storage_type.label()}
                            </p>
                            <p class="report-headline">{r.shelf_life_text.clone()}</p>
                            <p>
                                <span class=badge>{format!("{} risk", r.risk_level)}</span>
                                " score " {format!("{:.2}", r.risk_score)}
                            </p>
                            <p><b>"Thermal range: "</b> {r.temp_range.clone()}</p>
                            <p class="note">{r.note.clone()}</p>
                        }
                            .into_any()
                    }
                }}
            </div>
        </FeatureShell>
    }
}
