use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::persistence::PersistenceGateway;
use crate::recommendation::picker::RandomPicker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub gateway: Arc<dyn PersistenceGateway>,
    /// Immutable for the life of the process.
    pub catalog: Arc<Catalog>,
    pub config: Config,
}

impl AppState {
    /// A fresh picker per request; seeded from `SELECTION_SEED` when configured.
    pub fn picker(&self) -> RandomPicker {
        RandomPicker::from_seed(self.config.selection_seed)
    }
}
