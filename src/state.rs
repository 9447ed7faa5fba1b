use std::sync::Arc;

use crate::database::PostStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(store: impl PostStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
