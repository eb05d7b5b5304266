//! Read-only views handed to view adapters.
//!
//! A [`Snapshot`] is an owned copy; mutating it never affects the engine.

use serde::{Deserialize, Serialize};

use crate::catalog::{Mode, ModeId};
use crate::format::format_remaining;
use crate::profile::ProfileState;

/// One catalog entry together with its current profile state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub mode: Mode,
    pub state: ProfileState,
}

impl ProfileView {
    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    /// Formatted remaining time, e.g. `"1h 59m"`. `None` when disabled.
    pub fn remaining_label(&self) -> Option<String> {
        self.state.remaining_secs.map(format_remaining)
    }

    pub fn progress_pct(&self) -> Option<f64> {
        self.state.progress_pct()
    }
}

/// Consistent copy of every profile, in catalog order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub profiles: Vec<ProfileView>,
}

impl Snapshot {
    pub fn iter(&self) -> impl Iterator<Item = &ProfileView> {
        self.profiles.iter()
    }

    pub fn get(&self, id: &ModeId) -> Option<&ProfileView> {
        self.profiles.iter().find(|p| &p.mode.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &ProfileView> {
        self.profiles.iter().filter(|p| p.is_enabled())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Total feature labels across all enabled modes.
    pub fn features_enabled(&self) -> usize {
        self.active().map(|p| p.mode.features.len()).sum()
    }

    /// Plain profile states, e.g. for handing to [`ProfileStore::restore`](crate::profile::ProfileStore::restore).
    pub fn states(&self) -> Vec<ProfileState> {
        self.profiles.iter().map(|p| p.state.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn snapshot_with(enabled: &[(&str, u64)]) -> Snapshot {
        let profiles = Catalog::builtin()
            .modes()
            .iter()
            .map(|mode| {
                let state = match enabled.iter().find(|(id, _)| *id == mode.id.as_str()) {
                    Some((_, secs)) => ProfileState {
                        mode_id: mode.id.clone(),
                        enabled: true,
                        duration_secs: Some(*secs),
                        remaining_secs: Some(*secs),
                        paused: false,
                    },
                    None => ProfileState::disabled(mode.id.clone()),
                };
                ProfileView {
                    mode: mode.clone(),
                    state,
                }
            })
            .collect();
        Snapshot { profiles }
    }

    #[test]
    fn quick_stats_count_active_modes() {
        let snap = snapshot_with(&[("recovery", 60), ("voice-first", 7200)]);
        assert_eq!(snap.active_count(), 2);
        assert_eq!(snap.features_enabled(), 6);
    }

    #[test]
    fn empty_when_nothing_enabled() {
        let snap = snapshot_with(&[]);
        assert_eq!(snap.active_count(), 0);
        assert_eq!(snap.features_enabled(), 0);
        assert_eq!(snap.profiles.len(), 4);
    }

    #[test]
    fn remaining_label_uses_display_format() {
        let snap = snapshot_with(&[("eye-strain", 7200)]);
        let view = snap.get(&ModeId::from("eye-strain")).unwrap();
        assert_eq!(view.remaining_label().as_deref(), Some("2h 0m"));

        let off = snap.get(&ModeId::from("recovery")).unwrap();
        assert_eq!(off.remaining_label(), None);
    }
}
