use greenayu_core::feature::options::{Region, SoilType, Weather, YieldCrop};
use greenayu_core::feature::yield_forecast::{YieldForecast, YieldInput};
use greenayu_core::FeatureKind;
use leptos::prelude::*;

use super::{EmptyReport, FeatureShell};
use crate::components::form::choices;
use crate::components::{
    ErrorBanner, FeatureForm, NumberField, SelectField, SubmitButton, ToggleField,
};
use crate::state::AppState;

#[component]
pub fn YieldPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let form = FeatureForm::<YieldForecast>::new(state.transport());
    let input = RwSignal::new(YieldInput::default());

    let edit = move |apply: &dyn Fn(&mut YieldInput)| {
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
            kind=FeatureKind::Yield
            subtitle="Project harvest per hectare from region, soil, weather and field practice."
        >
            <form class="card feature-form" on:submit=on_submit>
                <div class="field-grid">
                    <SelectField
                        label="Region"
                        options=choices!(Region)
                        value=Signal::derive(move || input.with(|i| i.region.to_string()))
                        on_change=move |v: String| {
                            if let Ok(region) = v.parse::<Region>() {
                                edit(&|i| i.region = region);
                            }
                        }
                    />
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
                        label="Crop"
                        options=choices!(YieldCrop)
                        value=Signal::derive(move || input.with(|i| i.crop.to_string()))
                        on_change=move |v: String| {
                            if let Ok(crop) = v.parse::<YieldCrop>() {
                                edit(&|i| i.crop = crop);
                            }
                        }
                    />
                    <SelectField
                        label="Weather condition"
                        options=choices!(Weather)
                        value=Signal::derive(move || input.with(|i| i.weather.to_string()))
                        on_change=move |v: String| {
                            if let Ok(weather) = v.parse::<Weather>() {
                                edit(&|i| i.weather = weather);
                            }
                        }
                    />
                </div>

                <div class="field-grid">
                    <NumberField
                        label="Rainfall (mm)"
                        value=Signal::derive(move || input.with(|i| i.rainfall_mm))
                        on_change=move |v: f64| edit(&|i| i.rainfall_mm = v)
                    />
                    <NumberField
                        label="Temperature (°C)"
                        value=Signal::derive(move || input.with(|i| i.temperature_celsius))
                        on_change=move |v: f64| edit(&|i| i.temperature_celsius = v)
                    />
                    <NumberField
                        label="Days to harvest"
                        step="1"
                        value=Signal::derive(move || input.with(|i| f64::from(i.days_to_harvest)))
                        on_change=move |v: f64| {
                            let days = if v.is_finite() && v >= 1.0 { v.round() as u32 } else { 0 };
                            edit(&|i| i.days_to_harvest = days);
                        }
                    />
                </div>

                <div class="field-grid">
                    <ToggleField
                        label="Fertilizer used"
                        value=Signal::derive(move || input.with(|i| i.fertilizer_used))
                        on_change=move |v: bool| edit(&|i| i.fertilizer_used = v)
                    />
                    <ToggleField
                        label="Irrigation used"
                        value=Signal::derive(move || input.with(|i| i.irrigation_used))
                        on_change=move |v: bool| edit(&|i| i.irrigation_used = v)
                    />
                </div>

                <ErrorBanner message=Signal::derive(move || form.error()) />
                <SubmitButton
                    label="Forecast Yield"
                    busy_label="Forecasting..."
                    busy=Signal::derive(move || form.is_submitting())
                />
            </form>

            <div class="card report">
                {move || match form.result() {
                    None => view! { <EmptyReport text="Fill in the season details to forecast the harvest." /> }.into_any(),
                    Some(r) => view! {
                        <h3>"Harvest Projection"</h3>
                        <p class="muted">{r.plant.clone()}</p>
                        <p class="report-headline">
                            {r.yield_text.clone()} <span class="unit">{format!(" tons / {}", r.unit)}</span>
                        </p>
                        <p class="note">{r.note.clone()}</p>
                    }
                        .into_any(),
                }}
            </div>
        </FeatureShell>
    }
}
