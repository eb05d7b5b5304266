//! Timed activation profiles.
//!
//! - [`ProfileState`]: the mutable record for one mode
//! - [`transition`]: the one function that changes a record
//! - [`ProfileStore`]: owner of all records, keyed by mode id

mod state;
mod store;
mod transition;

pub use state::ProfileState;
pub use store::{ProfileStore, TickReport};
pub use transition::{transition, Change, Mutation, Outcome};

use crate::error::ProfileError;

/// Lifetime given to a mode enabled from the toggle control (2 hours).
pub const DEFAULT_DURATION_SECS: u64 = 2 * 60 * 60;

/// Step used by the "+1 hour" extension control.
pub const DEFAULT_EXTEND_SECS: u64 = 60 * 60;

/// Convert a signed user-supplied duration into a positive number of seconds.
///
/// Zero and negative values are `InvalidDuration`.
pub fn checked_duration(seconds: i64) -> Result<u64, ProfileError> {
    if seconds <= 0 {
        return Err(ProfileError::InvalidDuration { seconds });
    }
    Ok(seconds as u64)
}
