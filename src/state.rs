use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, storage::CommentStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommentStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: impl CommentStore + 'static, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn CommentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
