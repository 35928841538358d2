//! Shared Server State
//!
//! The user store behind a lock, plus the server start time for uptime
//! reporting. Mutating handlers hold the write guard for their whole
//! check-then-mutate sequence, so no two creates can race on ids or emails.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::rest_api::{ApiError, ApiResult};
use crate::store::UserStore;

/// Shared state handle passed to every handler
pub type SharedState = Arc<AppState>;

/// Application state
pub struct AppState {
    store: RwLock<UserStore>,
    started_at: Instant,
}

impl AppState {
    /// State over the given store
    pub fn new(store: UserStore) -> Self {
        Self {
            store: RwLock::new(store),
            started_at: Instant::now(),
        }
    }

    /// State over a freshly seeded store
    pub fn seeded() -> Self {
        Self::new(UserStore::seeded())
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    /// Acquire the store for reading
    pub fn read(&self) -> ApiResult<RwLockReadGuard<'_, UserStore>> {
        self.store
            .read()
            .map_err(|_| ApiError::Internal("Lock poisoned".to_string()))
    }

    /// Acquire the store for writing
    pub fn write(&self) -> ApiResult<RwLockWriteGuard<'_, UserStore>> {
        self.store
            .write()
            .map_err(|_| ApiError::Internal("Lock poisoned".to_string()))
    }

    /// Seconds since this state was created
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seeded()
    }
}
