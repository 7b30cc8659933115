//! Reusable UI components

pub mod form;
pub mod header;
pub mod loading;
pub mod protected;

pub use form::{
    ErrorBanner, FeatureForm, ImagePicker, NumberField, SelectField, SubmitButton, ToggleField,
};
pub use header::{Footer, Header};
pub use loading::LoadingSpinner;
pub use protected::Protected;
