//! Application state for the web layer.

use std::sync::Arc;

use crate::ocm::OcmClient;
use crate::resolver::{Resolver, ResolverConfig};
use crate::store::StationStore;

/// Shared application state.
///
/// Generic over the store implementation so tests can serve from an
/// in-memory store.
pub struct AppState<S> {
    /// Authoritative station store
    pub store: Arc<S>,

    /// Nearby-station resolver over the same store
    pub resolver: Arc<Resolver<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<S: StationStore> AppState<S> {
    /// Create a new app state.
    pub fn new(store: S, directory: OcmClient, config: ResolverConfig) -> Self {
        let store = Arc::new(store);
        let resolver = Arc::new(Resolver::new(Arc::clone(&store), directory, config));

        Self { store, resolver }
    }
}
