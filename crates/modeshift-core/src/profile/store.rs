//! Canonical owner of every profile record.
//!
//! The store holds the validated catalog and exactly one [`ProfileState`] per
//! catalog mode, keyed by [`ModeId`]. All writes go through
//! [`transition`](super::transition::transition); nothing hands out mutable
//! references to the records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::state::ProfileState;
use super::transition::{transition, Mutation};
use crate::catalog::{Catalog, ModeId};
use crate::error::ProfileError;
use crate::events::{DisableReason, Event};
use crate::snapshot::{ProfileView, Snapshot};

/// Result of one lifecycle pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Events in ascending mode id order.
    pub events: Vec<Event>,
    /// Profiles that could not be processed; the pass continued without them.
    pub failures: Vec<ProfileError>,
}

impl TickReport {
    pub fn expired(&self) -> impl Iterator<Item = &ModeId> {
        self.events.iter().filter(|e| e.is_expiry()).map(Event::mode_id)
    }
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    catalog: Catalog,
    profiles: BTreeMap<ModeId, ProfileState>,
}

impl ProfileStore {
    /// Every catalog mode starts disabled.
    pub fn new(catalog: Catalog) -> Self {
        let profiles = catalog
            .ids()
            .map(|id| (id.clone(), ProfileState::disabled(id.clone())))
            .collect();
        Self { catalog, profiles }
    }

    /// Rebuild a store from previously captured states.
    ///
    /// Modes absent from `states` start disabled. Unknown ids, duplicates and
    /// records that break the profile invariants are rejected.
    pub fn restore(catalog: Catalog, states: Vec<ProfileState>) -> Result<Self, ProfileError> {
        let mut store = Self::new(catalog);
        let mut seen = BTreeMap::new();

        for state in states {
            if !store.catalog.contains(&state.mode_id) {
                return Err(ProfileError::UnknownMode {
                    mode_id: state.mode_id,
                });
            }
            if seen.insert(state.mode_id.clone(), ()).is_some() {
                return Err(ProfileError::Inconsistent {
                    mode_id: state.mode_id,
                    message: "duplicate record".to_string(),
                });
            }
            state.check()?;
            store.profiles.insert(state.mode_id.clone(), state);
        }

        Ok(store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self, id: &ModeId) -> Option<&ProfileState> {
        self.profiles.get(id)
    }

    /// Owned copy of every profile in catalog order.
    pub fn snapshot(&self) -> Snapshot {
        let profiles = self
            .catalog
            .modes()
            .iter()
            .map(|mode| ProfileView {
                mode: mode.clone(),
                state: self
                    .profiles
                    .get(&mode.id)
                    .cloned()
                    .unwrap_or_else(|| ProfileState::disabled(mode.id.clone())),
            })
            .collect();
        Snapshot { profiles }
    }

    /// Apply one mutation to the named profile.
    ///
    /// Returns the resulting event, or `None` when the profile was already in
    /// the target state. On error the store is unchanged.
    pub fn apply(
        &mut self,
        id: &ModeId,
        mutation: Mutation,
        at: DateTime<Utc>,
    ) -> Result<Option<Event>, ProfileError> {
        let current = self
            .profiles
            .get_mut(id)
            .ok_or_else(|| ProfileError::UnknownMode { mode_id: id.clone() })?;

        let outcome = transition(current, mutation)?;
        *current = outcome.next;

        let event = outcome
            .change
            .and_then(|change| change.into_event(id.clone(), at));
        if let Some(ref event) = event {
            debug!(mode = %id, ?mutation, "profile mutation applied");
            if event.is_expiry() {
                info!(mode = %id, "profile expired");
            }
        }
        Ok(event)
    }

    /// Run one lifecycle pass over all running profiles.
    ///
    /// Each running profile decays by its own `elapsed_secs(id)` (floored at
    /// zero); any profile left at zero is disabled through the same path as a
    /// user disable. Profiles are visited in ascending id order, so batch
    /// expiries are reported deterministically.
    pub fn tick(
        &mut self,
        elapsed_secs: impl Fn(&ModeId) -> u64,
        at: DateTime<Utc>,
    ) -> TickReport {
        let mut report = TickReport::default();
        let running: Vec<ModeId> = self
            .profiles
            .iter()
            .filter(|(_, state)| state.is_running())
            .map(|(id, _)| id.clone())
            .collect();

        for id in running {
            match self.tick_one(&id, elapsed_secs(&id), at) {
                Ok(Some(event)) => report.events.push(event),
                Ok(None) => {}
                Err(err) => {
                    warn!(mode = %id, error = %err, "skipping profile during tick");
                    report.failures.push(err);
                }
            }
        }

        report
    }

    fn tick_one(
        &mut self,
        id: &ModeId,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    ) -> Result<Option<Event>, ProfileError> {
        self.apply(id, Mutation::Decay { elapsed_secs }, at)?;

        let expired = self
            .profiles
            .get(id)
            .is_some_and(|s| s.is_running() && s.remaining_secs == Some(0));
        if !expired {
            return Ok(None);
        }

        self.apply(
            id,
            Mutation::Disable {
                reason: DisableReason::Expired,
            },
            at,
        )
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}
