//! Recurring tick that decays and expires profiles.
//!
//! The controller owns nothing but the handle of its tick task. Each tick
//! calls [`ProfileEngine::tick`], which measures elapsed time on the engine's
//! clock, so a test can drive expiry by advancing a `ManualClock` instead of
//! waiting on real time.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = LifecycleController::new(engine.clone());
//! controller.start()?;   // inside a Tokio runtime
//! // ...
//! controller.stop();     // no tick fires after this returns
//! ```

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::engine::ProfileEngine;
use crate::error::{CoreError, Result};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct LifecycleController {
    engine: ProfileEngine,
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl LifecycleController {
    pub fn new(engine: ProfileEngine) -> Self {
        Self::with_interval(engine, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_interval(engine: ProfileEngine, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            handle: None,
        }
    }

    pub fn engine(&self) -> &ProfileEngine {
        &self.engine
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Schedule the recurring tick on the current Tokio runtime.
    ///
    /// Returns `Ok(false)` if the tick is already scheduled; a second task is
    /// never spawned. Time that passed while the controller was stopped is not
    /// counted against running profiles.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Runtime`] if the interval is zero or no Tokio
    /// runtime is available. Nothing is scheduled in that case.
    pub fn start(&mut self) -> Result<bool> {
        if self.is_running() {
            return Ok(false);
        }
        if self.interval.is_zero() {
            return Err(CoreError::Runtime("tick interval must be non-zero".into()));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CoreError::Runtime(format!("no tokio runtime: {e}")))?;

        self.engine.resync();
        let engine = self.engine.clone();
        let interval = self.interval;
        self.handle = Some(runtime.spawn(run_ticks(engine, interval)));

        info!(interval_ms = interval.as_millis() as u64, "lifecycle controller started");
        Ok(true)
    }

    /// Cancel the tick task. Returns `false` if nothing was scheduled.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                info!("lifecycle controller stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run_ticks(engine: ProfileEngine, interval: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let events = engine.tick();
        if !events.is_empty() {
            debug!(count = events.len(), "tick produced events");
        }
    }
}
