//! Native access to the inference backend.

pub mod http;
pub mod workbench;

pub use http::HttpTransport;
pub use workbench::Workbench;
