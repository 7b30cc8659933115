//! Form fields and the submit/outcome plumbing shared by the feature pages.

use std::sync::Arc;

use greenayu_core::feature::upload::validate_image_meta;
use greenayu_core::{AdapterState, Feature, FeatureAdapter, ImageUpload, Transport};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use super::loading::LoadingSpinner;
use crate::api::{preview_url, read_file};

/// `(wire value, label)` pairs for a form option enum.
macro_rules! choices {
    ($option:ty) => {
        <$option>::ALL
            .iter()
            .map(|o| (o.as_str(), o.label()))
            .collect::<Vec<(&'static str, &'static str)>>()
    };
}
pub(crate) use choices;

/// A [`FeatureAdapter`] plus a signal mirroring its state for the view.
///
/// `Copy`, so every field handler on a page can capture it.
pub struct FeatureForm<F: Feature> {
    adapter: StoredValue<Arc<FeatureAdapter<F>>>,
    status: RwSignal<AdapterState<F::Output>>,
}

impl<F: Feature> Clone for FeatureForm<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Feature> Copy for FeatureForm<F> {}

impl<F> FeatureForm<F>
where
    F: Feature + 'static,
    F::Input: 'static,
    F::Output: Send + Sync + 'static,
{
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            adapter: StoredValue::new(Arc::new(FeatureAdapter::new(transport))),
            status: RwSignal::new(AdapterState::Idle),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status.with(|s| s.is_submitting())
    }

    pub fn result(&self) -> Option<F::Output> {
        self.status.with(|s| match s {
            AdapterState::Success(result) => Some(result.clone()),
            _ => None,
        })
    }

    pub fn error(&self) -> Option<String> {
        self.status.with(|s| match s {
            AdapterState::Failed(e) => Some(e.to_string()),
            _ => None,
        })
    }

    /// Any field edit drops the previous outcome.
    pub fn edited(&self) {
        let state = self.adapter.with_value(|adapter| {
            adapter.reset();
            adapter.state()
        });
        self.status.set(state);
    }

    pub fn submit(&self, input: F::Input) {
        let adapter = self.adapter.get_value();
        let status = self.status;
        let kind = F::KIND;
        status.set(AdapterState::Submitting);

        spawn_local(async move {
            if let Err(e) = adapter.submit(&input).await {
                tracing::warn!(feature = %kind, error = %e, "Submission failed");
            }
            status.set(adapter.state());
        });
    }
}

#[component]
pub fn NumberField(
    label: &'static str,
    #[prop(into)] value: Signal<f64>,
    #[prop(into)] on_change: Callback<f64>,
    #[prop(default = "any")] step: &'static str,
    #[prop(optional)] hint: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type="number"
                step=step
                class="input"
                prop:value=move || value.get().to_string()
                on:change=move |ev| {
                    let parsed = event_target_value(&ev).trim().parse::<f64>().unwrap_or(f64::NAN);
                    on_change.run(parsed);
                }
            />
            {hint.map(|h| view! { <span class="field-hint">{h}</span> })}
        </label>
    }
}

#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                class="input"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(wire, text)| {
                        view! {
                            <option value=wire selected=move || value.get() == wire>
                                {text}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn ToggleField(
    label: &'static str,
    #[prop(into)] value: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="field field-toggle">
            <input
                type="checkbox"
                prop:checked=move || value.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span class="field-label">{label}</span>
        </label>
    }
}

/// File input with type/size checks and a preview.
///
/// Rejected files are reported inline and clear the current upload.
#[component]
pub fn ImagePicker(#[prop(into)] on_pick: Callback<Option<ImageUpload>>) -> impl IntoView {
    let preview = RwSignal::new(Option::<String>::None);
    let problem = RwSignal::new(Option::<String>::None);

    let on_change = move |ev: leptos::ev::Event| {
        let Some(file) = event_target::<HtmlInputElement>(&ev)
            .files()
            .and_then(|files| files.get(0))
        else {
            preview.set(None);
            on_pick.run(None);
            return;
        };

        if let Err(e) = validate_image_meta(&file.type_(), file.size() as u64) {
            preview.set(None);
            problem.set(Some(e.to_string()));
            on_pick.run(None);
            return;
        }

        problem.set(None);
        preview.set(preview_url(&file));
        spawn_local(async move {
            match read_file(&file).await {
                Ok(upload) => on_pick.run(Some(upload)),
                Err(e) => {
                    problem.set(Some(e));
                    on_pick.run(None);
                }
            }
        });
    };

    view! {
        <div class="image-picker">
            <label class="dropzone">
                <input
                    type="file"
                    accept="image/jpeg,image/png,image/webp"
                    class="hidden"
                    on:change=on_change
                />
                {move || match preview.get() {
                    Some(url) => view! { <img src=url alt="Selected image" class="preview" /> }.into_any(),
                    None => view! {
                        <span class="dropzone-text">"Click to upload a JPG, PNG or WEBP image (max 10MB)"</span>
                    }
                        .into_any(),
                }}
            </label>
            <ErrorBanner message=problem />
        </div>
    }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(|m| m.is_some())>
            <div class="alert alert-error">{move || message.get().unwrap_or_default()}</div>
        </Show>
    }
}

#[component]
pub fn SubmitButton(
    label: &'static str,
    busy_label: &'static str,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary w-full" disabled=move || busy.get()>
            <Show when=move || busy.get()>
                <LoadingSpinner />
            </Show>
            {move || if busy.get() { busy_label } else { label }}
        </button>
    }
}
