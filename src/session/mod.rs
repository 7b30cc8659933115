//! Native session persistence.

pub mod file_storage;

pub use file_storage::FileStorage;

use greenayu_core::{SessionStore, StaticDemoProvider};
use std::sync::Arc;

use crate::utils::toml_config::SessionConfig;

/// Session store over the configured session file, restored from disk.
pub fn open_store(config: &SessionConfig) -> SessionStore<FileStorage> {
    let store = SessionStore::new(
        FileStorage::new(config.path.clone()),
        Arc::new(StaticDemoProvider::new()),
    );
    store.restore();
    store
}
