use serde::{Deserialize, Serialize};

use crate::catalog::ModeId;
use crate::error::ProfileError;

/// Timed activation record for one mode.
///
/// A disabled profile carries no timer: `duration_secs` and `remaining_secs`
/// are `None` and `paused` is false. An enabled profile always has both, with
/// `remaining_secs <= duration_secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileState {
    pub mode_id: ModeId,
    pub enabled: bool,
    /// Total allotted lifetime since the last (re)activation, extensions included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<u64>,
    #[serde(default)]
    pub paused: bool,
}

impl ProfileState {
    pub fn disabled(mode_id: ModeId) -> Self {
        Self {
            mode_id,
            enabled: false,
            duration_secs: None,
            remaining_secs: None,
            paused: false,
        }
    }

    pub(crate) fn active(mode_id: ModeId, duration_secs: u64) -> Self {
        Self {
            mode_id,
            enabled: true,
            duration_secs: Some(duration_secs),
            remaining_secs: Some(duration_secs),
            paused: false,
        }
    }

    /// Enabled and not paused, i.e. subject to decay on the next tick.
    pub fn is_running(&self) -> bool {
        self.enabled && !self.paused
    }

    /// Percentage of the allotted time still remaining (100.0 right after enable).
    ///
    /// Derived from stored state only, so it stays frozen while paused.
    pub fn progress_pct(&self) -> Option<f64> {
        match (self.enabled, self.remaining_secs, self.duration_secs) {
            (true, Some(remaining), Some(duration)) if duration > 0 => {
                Some((remaining as f64 / duration as f64 * 100.0).min(100.0))
            }
            _ => None,
        }
    }

    /// Verify the record satisfies the profile invariants.
    pub fn check(&self) -> Result<(), ProfileError> {
        let fail = |message: &str| {
            Err(ProfileError::Inconsistent {
                mode_id: self.mode_id.clone(),
                message: message.to_string(),
            })
        };

        if !self.enabled {
            if self.duration_secs.is_some() || self.remaining_secs.is_some() {
                return fail("disabled profile carries a timer");
            }
            if self.paused {
                return fail("disabled profile is marked paused");
            }
            return Ok(());
        }

        match (self.duration_secs, self.remaining_secs) {
            (Some(0), _) => fail("enabled profile has zero duration"),
            (Some(duration), Some(remaining)) if remaining <= duration => Ok(()),
            (Some(_), Some(_)) => fail("remaining time exceeds duration"),
            _ => fail("enabled profile has no timer"),
        }
    }
}
