//! The single state-transition function.
//!
//! Every change to a [`ProfileState`], whether it comes from a user command or
//! from the lifecycle tick, is expressed as a [`Mutation`] and goes through
//! [`transition`]. Expiry is `Disable { reason: Expired }`, the same variant
//! an explicit disable uses.
//!
//! ```text
//! Disabled --Enable/Toggle--> Running <--Pause/Resume--> Paused
//!    ^                           |                          |
//!    +----Disable/Toggle/expiry--+-----Disable/Toggle-------+
//! ```

use chrono::{DateTime, Utc};

use super::state::ProfileState;
use crate::catalog::ModeId;
use crate::error::ProfileError;
use crate::events::{DisableReason, Event};

/// Tagged command applied to one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Enable { duration_secs: u64 },
    Disable { reason: DisableReason },
    Toggle { default_duration_secs: u64 },
    Extend { delta_secs: u64 },
    Pause,
    Resume,
    /// Lifecycle decay by elapsed time, floored at zero.
    Decay { elapsed_secs: u64 },
}

/// What a transition changed, before it is stamped with a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Enabled { duration_secs: u64, restarted: bool },
    Disabled { reason: DisableReason },
    Extended {
        delta_secs: u64,
        duration_secs: u64,
        remaining_secs: u64,
    },
    Paused { remaining_secs: u64 },
    Resumed { remaining_secs: u64 },
    Decayed { remaining_secs: u64 },
}

impl Change {
    /// Decay is internal bookkeeping and produces no event.
    pub fn into_event(self, mode_id: ModeId, at: DateTime<Utc>) -> Option<Event> {
        let event = match self {
            Change::Enabled {
                duration_secs,
                restarted,
            } => Event::ProfileEnabled {
                mode_id,
                duration_secs,
                restarted,
                at,
            },
            Change::Disabled { reason } => Event::ProfileDisabled {
                mode_id,
                reason,
                at,
            },
            Change::Extended {
                delta_secs,
                duration_secs,
                remaining_secs,
            } => Event::ProfileExtended {
                mode_id,
                delta_secs,
                duration_secs,
                remaining_secs,
                at,
            },
            Change::Paused { remaining_secs } => Event::ProfilePaused {
                mode_id,
                remaining_secs,
                at,
            },
            Change::Resumed { remaining_secs } => Event::ProfileResumed {
                mode_id,
                remaining_secs,
                at,
            },
            Change::Decayed { .. } => return None,
        };
        Some(event)
    }
}

/// Result of a successful transition. `change` is `None` for no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub next: ProfileState,
    pub change: Option<Change>,
}

impl Outcome {
    fn unchanged(current: &ProfileState) -> Self {
        Self {
            next: current.clone(),
            change: None,
        }
    }

    fn changed(next: ProfileState, change: Change) -> Self {
        Self {
            next,
            change: Some(change),
        }
    }
}

/// Compute the next state for `current` under `mutation`.
///
/// Pure: `current` is never modified, so a failed transition leaves no trace.
/// Disable is accepted from any record, including an inconsistent one.
pub fn transition(current: &ProfileState, mutation: Mutation) -> Result<Outcome, ProfileError> {
    if !matches!(mutation, Mutation::Disable { .. }) {
        current.check()?;
    }

    match mutation {
        Mutation::Enable { duration_secs } => enable(current, duration_secs),
        Mutation::Disable { reason } => Ok(disable(current, reason)),
        Mutation::Toggle {
            default_duration_secs,
        } => {
            if current.enabled {
                Ok(disable(current, DisableReason::User))
            } else {
                enable(current, default_duration_secs)
            }
        }
        Mutation::Extend { delta_secs } => extend(current, delta_secs),
        Mutation::Pause => Ok(set_paused(current, true)),
        Mutation::Resume => Ok(set_paused(current, false)),
        Mutation::Decay { elapsed_secs } => Ok(decay(current, elapsed_secs)),
    }
}

fn enable(current: &ProfileState, duration_secs: u64) -> Result<Outcome, ProfileError> {
    if duration_secs == 0 {
        return Err(ProfileError::InvalidDuration { seconds: 0 });
    }
    let next = ProfileState::active(current.mode_id.clone(), duration_secs);
    Ok(Outcome::changed(
        next,
        Change::Enabled {
            duration_secs,
            restarted: current.enabled,
        },
    ))
}

fn disable(current: &ProfileState, reason: DisableReason) -> Outcome {
    let next = ProfileState::disabled(current.mode_id.clone());
    if *current == next {
        return Outcome::unchanged(current);
    }
    Outcome::changed(next, Change::Disabled { reason })
}

fn extend(current: &ProfileState, delta_secs: u64) -> Result<Outcome, ProfileError> {
    if delta_secs == 0 {
        return Err(ProfileError::InvalidDuration { seconds: 0 });
    }
    if !current.enabled {
        return Err(ProfileError::NotActive {
            mode_id: current.mode_id.clone(),
        });
    }

    let mut next = current.clone();
    let duration_secs = current.duration_secs.unwrap_or(0).saturating_add(delta_secs);
    let remaining_secs = current.remaining_secs.unwrap_or(0).saturating_add(delta_secs);
    next.duration_secs = Some(duration_secs);
    next.remaining_secs = Some(remaining_secs);

    Ok(Outcome::changed(
        next,
        Change::Extended {
            delta_secs,
            duration_secs,
            remaining_secs,
        },
    ))
}

fn set_paused(current: &ProfileState, paused: bool) -> Outcome {
    if !current.enabled || current.paused == paused {
        return Outcome::unchanged(current);
    }

    let mut next = current.clone();
    next.paused = paused;
    let remaining_secs = current.remaining_secs.unwrap_or(0);
    let change = if paused {
        Change::Paused { remaining_secs }
    } else {
        Change::Resumed { remaining_secs }
    };
    Outcome::changed(next, change)
}

fn decay(current: &ProfileState, elapsed_secs: u64) -> Outcome {
    if !current.is_running() || elapsed_secs == 0 {
        return Outcome::unchanged(current);
    }

    let mut next = current.clone();
    let remaining_secs = current.remaining_secs.unwrap_or(0).saturating_sub(elapsed_secs);
    next.remaining_secs = Some(remaining_secs);
    Outcome::changed(next, Change::Decayed { remaining_secs })
}
