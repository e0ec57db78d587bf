//! Cache-backed presence state shared across requests.

use std::path::PathBuf;
use std::sync::Arc;

use kintai_core::cache::TtlCache;
use kintai_core::config::Settings;
use kintai_core::error::CoreResult;
use kintai_core::presence::PresenceTable;
use kintai_core::presence::load::load_presence;
use salvo::async_trait;

use crate::error::{AppError, AppResult};

/// Owns the TTL cache wrapping the CSV load; the cache is the only
/// long-lived holder of a loaded table.
#[derive(Debug)]
pub struct PresenceState {
    csv_path: PathBuf,
    cache: TtlCache<PresenceTable>,
}

impl PresenceState {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            csv_path: settings.data.csv_path.clone(),
            cache: TtlCache::new(settings.cache.ttl(), settings.cache.enabled),
        }
    }

    /// ## Summary
    /// Returns the presence table, reusing the cached snapshot within the
    /// TTL window.
    ///
    /// ## Errors
    /// Returns an error if the CSV file cannot be read.
    pub fn load(&self) -> CoreResult<PresenceTable> {
        self.cache.get_or_compute(|| load_presence(&self.csv_path))
    }
}

pub struct StateHandler {
    pub state: Arc<PresenceState>,
}

#[async_trait]
impl salvo::Handler for StateHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.state));
    }
}

/// ## Summary
/// Retrieves the shared presence state from the depot.
///
/// ## Errors
/// Returns an error if the state is not found in the depot.
pub fn get_state_from_depot(depot: &salvo::Depot) -> AppResult<Arc<PresenceState>> {
    depot
        .obtain::<Arc<PresenceState>>()
        .cloned()
        .map_err(|_err| {
            AppError::CoreError(kintai_core::error::CoreError::InvariantViolation(
                "Presence state not found in depot",
            ))
        })
}
