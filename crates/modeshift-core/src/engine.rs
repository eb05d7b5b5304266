//! Mutation API over the profile store.
//!
//! [`ProfileEngine`] is the single entry point for every state change. It owns
//! the [`ProfileStore`] behind one mutex, so user commands and lifecycle ticks
//! never interleave mid-update, and it stamps every event with the injected
//! [`Clock`].
//!
//! ## Usage
//!
//! ```ignore
//! let engine = ProfileEngine::new(Catalog::builtin(), Arc::new(SystemClock));
//! engine.enable(&"recovery".into(), DEFAULT_DURATION_SECS)?;
//! // Periodically (normally from a LifecycleController):
//! let expired = engine.tick();
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;

use crate::catalog::{Catalog, ModeId};
use crate::clock::Clock;
use crate::error::ProfileError;
use crate::events::{DisableReason, Event};
use crate::profile::{Mutation, ProfileState, ProfileStore};
use crate::snapshot::Snapshot;

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug)]
struct EngineInner {
    store: ProfileStore,
    /// Per running profile: the clock reading its decay has been counted up
    /// to. Set when the profile starts or resumes; sub-second remainders stay
    /// in the gap and are counted by the next tick.
    anchors: BTreeMap<ModeId, DateTime<Utc>>,
}

impl EngineInner {
    fn new(store: ProfileStore, now: DateTime<Utc>) -> Self {
        let mut inner = Self {
            store,
            anchors: BTreeMap::new(),
        };
        inner.resync(now);
        inner
    }

    fn is_running(&self, id: &ModeId) -> bool {
        self.store.state(id).is_some_and(ProfileState::is_running)
    }

    /// Count decay for every running profile from `now` on.
    fn resync(&mut self, now: DateTime<Utc>) {
        let store = &self.store;
        self.anchors = store
            .catalog()
            .ids()
            .filter(|id| store.state(id).is_some_and(ProfileState::is_running))
            .map(|id| (id.clone(), now))
            .collect();
    }
}

/// Shared handle to the profile store. Clones refer to the same store.
#[derive(Debug, Clone)]
pub struct ProfileEngine {
    inner: Arc<Mutex<EngineInner>>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<Event>,
}

impl ProfileEngine {
    pub fn new(catalog: Catalog, clock: Arc<dyn Clock>) -> Self {
        Self::with_store(ProfileStore::new(catalog), clock)
    }

    pub fn with_store(store: ProfileStore, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let inner = EngineInner::new(store, clock.now());
        Self {
            inner: Arc::new(Mutex::new(inner)),
            clock,
            events,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        self.lock().store.snapshot()
    }

    pub fn state(&self, id: &ModeId) -> Option<ProfileState> {
        self.lock().store.state(id).cloned()
    }

    pub fn catalog(&self) -> Catalog {
        self.lock().store.catalog().clone()
    }

    /// Stream of every event, including expiry notifications from ticks.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enable (or restart) a profile for `duration_secs`.
    pub fn enable(&self, id: &ModeId, duration_secs: u64) -> Result<Option<Event>, ProfileError> {
        self.apply(id, Mutation::Enable { duration_secs })
    }

    /// Disable a profile. Disabling a disabled profile returns `Ok(None)`.
    pub fn disable(&self, id: &ModeId) -> Result<Option<Event>, ProfileError> {
        self.apply(
            id,
            Mutation::Disable {
                reason: DisableReason::User,
            },
        )
    }

    pub fn toggle(
        &self,
        id: &ModeId,
        default_duration_secs: u64,
    ) -> Result<Option<Event>, ProfileError> {
        self.apply(
            id,
            Mutation::Toggle {
                default_duration_secs,
            },
        )
    }

    /// Add time to an enabled profile. Fails with `NotActive` when disabled.
    pub fn extend(&self, id: &ModeId, delta_secs: u64) -> Result<Option<Event>, ProfileError> {
        self.apply(id, Mutation::Extend { delta_secs })
    }

    pub fn pause(&self, id: &ModeId) -> Result<Option<Event>, ProfileError> {
        self.apply(id, Mutation::Pause)
    }

    pub fn resume(&self, id: &ModeId) -> Result<Option<Event>, ProfileError> {
        self.apply(id, Mutation::Resume)
    }

    /// Run one lifecycle pass. Each running profile decays by the whole
    /// seconds elapsed on the clock since it was last counted, which is never
    /// earlier than the moment it was enabled or resumed.
    pub fn tick(&self) -> Vec<Event> {
        let mut guard = self.lock();
        let now = self.clock.now();
        let EngineInner { store, anchors } = &mut *guard;

        let elapsed: BTreeMap<ModeId, u64> = anchors
            .iter_mut()
            .map(|(id, anchor)| (id.clone(), whole_seconds_since(anchor, now)))
            .collect();
        let report = store.tick(|id| elapsed.get(id).copied().unwrap_or(0), now);
        anchors.retain(|id, _| store.state(id).is_some_and(ProfileState::is_running));

        for event in &report.events {
            self.publish(event);
        }
        report.events
    }

    /// Forget any time elapsed since the last pass.
    pub(crate) fn resync(&self) {
        let now = self.clock.now();
        self.lock().resync(now);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&self, id: &ModeId, mutation: Mutation) -> Result<Option<Event>, ProfileError> {
        let mut inner = self.lock();
        let now = self.clock.now();
        let was_running = inner.is_running(id);
        let event = inner.store.apply(id, mutation, now)?;

        if !inner.is_running(id) {
            inner.anchors.remove(id);
        } else if !was_running || matches!(event, Some(Event::ProfileEnabled { .. })) {
            // Started, restarted or resumed: decay counts from now.
            inner.anchors.insert(id.clone(), now);
        }
        // Published under the lock so subscribers see events in commit order.
        if let Some(ref event) = event {
            self.publish(event);
        }
        Ok(event)
    }

    fn publish(&self, event: &Event) {
        // No subscribers is fine.
        let _ = self.events.send(event.clone());
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        // Transitions are computed before they are committed, so a panic while
        // holding the lock cannot leave a half-applied record behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whole seconds from `anchor` to `now`. `anchor` moves forward by that
/// amount so the sub-second remainder counts towards the next pass.
fn whole_seconds_since(anchor: &mut DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed_ms = (now - *anchor).num_milliseconds();
    if elapsed_ms < 0 {
        // Clock moved backwards; start measuring again from here.
        *anchor = now;
        return 0;
    }
    let secs = elapsed_ms / 1000;
    *anchor += Duration::seconds(secs);
    secs as u64
}
