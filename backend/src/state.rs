//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::repositories::HistoryStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
///
/// Cloning is cheap: every field is behind an `Arc`. The history store is
/// additionally behind a mutex so that load, append and persist from
/// concurrent requests never interleave.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The single history store of this process
    pub history: Arc<Mutex<HistoryStore>>,
}

impl AppState {
    /// Create a new application state around an opened store
    pub fn new(config: AppConfig, history: HistoryStore) -> Self {
        Self {
            config: Arc::new(config),
            history: Arc::new(Mutex::new(history)),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a handle to the history store
    #[inline]
    pub fn history(&self) -> Arc<Mutex<HistoryStore>> {
        Arc::clone(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clones_share_one_store() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::default();
        let store = HistoryStore::open(dir.path().join("h.xml"), config.history.capacity);
        let state = AppState::new(config, store);

        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.history, &cloned.history));
        assert_eq!(cloned.history().lock().await.capacity(), 10);
    }
}
