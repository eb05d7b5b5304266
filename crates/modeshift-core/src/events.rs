use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ModeId;

/// Why a profile returned to the disabled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisableReason {
    /// Explicit disable or toggle.
    User,
    /// Remaining time reached zero during a tick.
    Expired,
}

/// Every profile state change produces an Event.
/// View adapters subscribe to them; expiry notifications arrive the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ProfileEnabled {
        mode_id: ModeId,
        duration_secs: u64,
        /// The profile was already enabled and its timer was restarted.
        restarted: bool,
        at: DateTime<Utc>,
    },
    ProfileDisabled {
        mode_id: ModeId,
        reason: DisableReason,
        at: DateTime<Utc>,
    },
    ProfileExtended {
        mode_id: ModeId,
        delta_secs: u64,
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ProfilePaused {
        mode_id: ModeId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ProfileResumed {
        mode_id: ModeId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn mode_id(&self) -> &ModeId {
        match self {
            Event::ProfileEnabled { mode_id, .. }
            | Event::ProfileDisabled { mode_id, .. }
            | Event::ProfileExtended { mode_id, .. }
            | Event::ProfilePaused { mode_id, .. }
            | Event::ProfileResumed { mode_id, .. } => mode_id,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::ProfileEnabled { at, .. }
            | Event::ProfileDisabled { at, .. }
            | Event::ProfileExtended { at, .. }
            | Event::ProfilePaused { at, .. }
            | Event::ProfileResumed { at, .. } => *at,
        }
    }

    pub fn is_expiry(&self) -> bool {
        matches!(
            self,
            Event::ProfileDisabled {
                reason: DisableReason::Expired,
                ..
            }
        )
    }
}
