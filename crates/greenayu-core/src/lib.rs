//! # greenayu-core
//!
//! Target-independent domain layer for the GreenAyu plant diagnostics client.
//! Everything here is free of I/O so that the native CLI and the browser
//! frontend apply exactly the same rules.
//!
//! ## What lives here
//!
//! - **Sessions**: the single demo identity, persisted through a pluggable
//!   [`SessionStorage`] and authenticated by a pluggable
//!   [`AuthenticationProvider`].
//! - **Routes**: the fixed route table and the [`RouteGuard`] that keeps
//!   feature pages behind a session.
//! - **Feature adapters**: the request/response contract every feature page
//!   repeats. A [`FeatureAdapter`] validates input, issues exactly one request
//!   through a [`Transport`], and maps the JSON reply into a view model or a
//!   classified [`FeatureError`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use greenayu_core::feature::{FeatureAdapter, shelf_life::{ShelfLife, ShelfLifeInput}};
//! use std::sync::Arc;
//!
//! let adapter = FeatureAdapter::<ShelfLife>::new(Arc::new(my_transport));
//! let result = adapter.submit(&ShelfLifeInput::default()).await?;
//! println!("{} ({} risk)", result.shelf_life_text, result.risk_level);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   authorize   ┌──────────────┐   current()   ┌──────────────┐
//! │  RouteGuard  │ ────────────▶ │ SessionStore │ ────────────▶ │SessionStorage│
//! └──────────────┘               └──────┬───────┘               └──────────────┘
//!                                       │ login()
//!                                       ▼
//!                             ┌───────────────────────┐
//!                             │AuthenticationProvider │
//!                             └───────────────────────┘
//!
//! ┌──────────────────┐  payload   ┌───────────┐  RawResponse  ┌──────────────────┐
//! │ FeatureAdapter<F>│ ─────────▶ │ Transport │ ────────────▶ │ F::map_response  │
//! └──────────────────┘            └───────────┘               └──────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod error;
pub mod feature;
pub mod routes;
pub mod session;

pub use auth::{AuthenticationProvider, StaticDemoProvider};
pub use error::{AuthError, FeatureError, FeatureErrorKind, StorageError, TransportError};
pub use feature::{
    confidence_percent, AdapterState, Encoding, Feature, FeatureAdapter, FeatureKind, ImageUpload,
    Payload, RawResponse, Transport,
};
pub use routes::{Access, Route, RouteGuard};
pub use session::{MemoryStorage, Session, SessionStorage, SessionStore, SESSION_KEY};
