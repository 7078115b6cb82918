//! Common test utilities for integration tests
//!
//! Builds fully wired app states over in-memory and file backends.

use fittrack_client::config::AppConfig;
use fittrack_client::persist::{FileStore, MemoryStore};
use fittrack_client::state::AppState;
use std::path::Path;
use std::sync::Arc;

/// Default config: stock goals and the well-known admin identity
pub fn test_config() -> AppConfig {
    AppConfig::default()
}

/// App state over a fresh in-memory backend
pub async fn memory_state() -> AppState {
    fittrack_client::logging::init();
    AppState::init(Arc::new(MemoryStore::new()), test_config()).await
}

/// App state over a file backend rooted at `dir`
pub async fn file_state(dir: &Path) -> AppState {
    fittrack_client::logging::init();
    let store = FileStore::open(dir).await.expect("open file store");
    AppState::init(Arc::new(store), test_config()).await
}
