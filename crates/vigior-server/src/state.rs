use std::sync::Arc;

use tokio::sync::Mutex;

use vigior_engine::engine::Engine;
use vigior_storage::error::StorageError;
use vigior_storage::records::RecordStore;

use crate::error::ApiError;

/// Shared application state, injected into all route handlers via Axum state.
///
/// The engine is immutable and shared freely; the store is the only shared
/// resource and is serialized behind a mutex.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(engine: Engine, store: RecordStore) -> Self {
        Self {
            engine: Arc::new(engine),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run file I/O against the store on the blocking pool, holding the
    /// store lock until it finishes.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&RecordStore) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store).lock_owned().await;
        let result = tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?;
        Ok(result?)
    }
}
