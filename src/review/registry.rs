use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::session::ReviewSession;

/// (operator id, meeting id)
pub type ReviewKey = (String, i64);

/// Open review sessions, one per operator and meeting.
///
/// Backend round-trips (load, refresh, save) run without holding the map
/// lock; [`SessionRegistry::begin`] makes sure only one of them is in flight
/// per key at a time.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<ReviewKey, ReviewSession>>,
    in_flight: Mutex<HashSet<ReviewKey>>,
}

/// Marks a key busy until dropped.
pub struct FlightGuard<'a> {
    registry: &'a SessionRegistry,
    key: ReviewKey,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        lock(&self.registry.in_flight).remove(&self.key);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for a backend round-trip. `None` if one is already running.
    pub fn begin(&self, key: &ReviewKey) -> Option<FlightGuard<'_>> {
        let mut busy = lock(&self.in_flight);
        if !busy.insert(key.clone()) {
            return None;
        }
        Some(FlightGuard {
            registry: self,
            key: key.clone(),
        })
    }

    pub fn is_busy(&self, key: &ReviewKey) -> bool {
        lock(&self.in_flight).contains(key)
    }

    pub fn insert(&self, key: ReviewKey, session: ReviewSession) {
        lock(&self.sessions).insert(key, session);
    }

    pub fn remove(&self, key: &ReviewKey) -> Option<ReviewSession> {
        lock(&self.sessions).remove(key)
    }

    pub fn contains(&self, key: &ReviewKey) -> bool {
        lock(&self.sessions).contains_key(key)
    }

    /// Run `f` against the session under the map lock.
    pub fn with_session<R>(
        &self,
        key: &ReviewKey,
        f: impl FnOnce(&mut ReviewSession) -> R,
    ) -> Option<R> {
        lock(&self.sessions).get_mut(key).map(f)
    }
}
