//! # GreenAyu
//!
//! Native client for the GreenAyu medicinal plant diagnostics backend.
//!
//! The domain rules (sessions, the route guard, the five feature adapters)
//! live in [`greenayu_core`] and are shared with the browser frontend. This
//! crate adds what only a native process needs:
//!
//! - [`backend`] - `reqwest` transport and the feature [`Workbench`]
//! - [`session`] - session persistence in a JSON file
//! - [`utils`] - `greenayu.toml` loading and validation
//! - [`cli`] - the `greenayu` command line
//! - [`api`] - `greenayu serve`, hosting the built frontend
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use greenayu::{GreenAyuConfig, Workbench};
//! use greenayu_core::feature::shelf_life::ShelfLifeInput;
//!
//! let config = GreenAyuConfig::load("greenayu.toml")?;
//! let bench = Workbench::from_config(&config.backend)?;
//! let result = bench.shelf_life.submit(&ShelfLifeInput::default()).await?;
//! println!("{} ({} risk)", result.shelf_life_text, result.risk_level);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Static shell host (axum).
pub mod api;
/// HTTP transport and feature adapters.
pub mod backend;
/// Command-line interface.
pub mod cli;
/// File-backed session storage.
pub mod session;
/// Core types (responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

pub use backend::{HttpTransport, Workbench};
pub use session::{open_store, FileStorage};
pub use types::{AppError, Result};
pub use utils::toml_config::{ConfigError, GreenAyuConfig};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded and validated configuration
    pub config: Arc<GreenAyuConfig>,
}
