use std::sync::Arc;

use crate::storage::SignedUrlProvider;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn SignedUrlProvider>,
}

impl AppState {
    pub fn new(storage: Arc<dyn SignedUrlProvider>) -> Self {
        AppState { storage }
    }
}
