//! Shared handler state.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::store::ContentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Content database handle.
    pub store: ContentStore,
    /// Site-specific settings.
    pub site: Arc<SiteConfig>,
}

impl AppState {
    /// Create state for the default site.
    #[must_use]
    pub fn new(store: ContentStore) -> Self {
        Self::with_site(store, SiteConfig::default())
    }

    #[must_use]
    pub fn with_site(store: ContentStore, site: SiteConfig) -> Self {
        Self {
            store,
            site: Arc::new(site),
        }
    }
}
