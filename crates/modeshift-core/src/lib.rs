//! # Modeshift Core Library
//!
//! This library provides the timed-profile lifecycle engine behind Modeshift's
//! accessibility modes (Recovery, Low Focus, Eye Strain, Voice-First). Each
//! mode, once enabled, stays active for a bounded time, can be extended,
//! paused or disabled, and expires on its own.
//!
//! ## Architecture
//!
//! - **Catalog**: the validated, immutable list of modes
//! - **Profile Store**: one timed record per mode; every change goes through a
//!   single transition function
//! - **Engine**: the mutation API; serialises writes behind one mutex and
//!   publishes events
//! - **Lifecycle Controller**: a recurring tick, driven by an injectable clock,
//!   that decays running profiles and expires them through the same disable
//!   path a user would take
//!
//! ## Key Components
//!
//! - [`ProfileEngine`]: commands, snapshots, event stream
//! - [`LifecycleController`]: start/stop the recurring tick
//! - [`Snapshot`]: read-only view for front-ends
//! - [`Config`]: lifecycle configuration

pub mod catalog;
pub mod clock;
pub mod engine;
pub mod error;
pub mod events;
pub mod format;
pub mod lifecycle;
pub mod profile;
pub mod snapshot;
pub mod storage;

pub use catalog::{Catalog, Mode, ModeId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::ProfileEngine;
pub use error::{ConfigError, CoreError, ProfileError, ValidationError};
pub use events::{DisableReason, Event};
pub use format::format_remaining;
pub use lifecycle::{LifecycleController, DEFAULT_TICK_INTERVAL};
pub use profile::{
    checked_duration, Mutation, ProfileState, ProfileStore, TickReport, DEFAULT_DURATION_SECS,
    DEFAULT_EXTEND_SECS,
};
pub use snapshot::{ProfileView, Snapshot};
pub use storage::{Config, LifecycleConfig};
