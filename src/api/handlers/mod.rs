//! API request handlers.

/// Liveness and backend info.
pub mod health;
/// Route table lookups for the frontend.
pub mod pages;
