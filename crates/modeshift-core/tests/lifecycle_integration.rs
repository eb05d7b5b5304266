//! Integration tests for the profile lifecycle.
//!
//! These tests drive the engine through its public API with a manual clock,
//! one simulated second per tick.

use std::sync::Arc;

use modeshift_core::{
    Catalog, Clock, DisableReason, Event, ManualClock, ModeId, ProfileEngine, ProfileError,
    ProfileState, DEFAULT_DURATION_SECS,
};

struct Harness {
    engine: ProfileEngine,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::at_epoch();
        let engine = ProfileEngine::new(Catalog::builtin(), Arc::new(clock.clone()));
        Self { engine, clock }
    }

    fn ticks(&self, n: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            self.clock.advance_secs(1);
            events.extend(self.engine.tick());
        }
        events
    }

    fn state(&self, mode: &str) -> ProfileState {
        self.engine.state(&id(mode)).unwrap()
    }
}

fn id(s: &str) -> ModeId {
    ModeId::from(s)
}

#[test]
fn test_expiry_converges_to_disabled() {
    let h = Harness::new();
    h.engine.enable(&id("recovery"), 5).unwrap();

    h.ticks(4);
    assert_eq!(h.state("recovery").remaining_secs, Some(1));
    assert!(h.state("recovery").enabled);

    let events = h.ticks(1);
    assert_eq!(h.state("recovery"), ProfileState::disabled(id("recovery")));
    assert_eq!(
        events,
        vec![Event::ProfileDisabled {
            mode_id: id("recovery"),
            reason: DisableReason::Expired,
            at: h.clock.now(),
        }]
    );
}

#[test]
fn test_expiry_and_manual_disable_end_in_same_state() {
    let expired = Harness::new();
    expired.engine.enable(&id("eye-strain"), 2).unwrap();
    expired.ticks(2);

    let manual = Harness::new();
    manual.engine.enable(&id("eye-strain"), 2).unwrap();
    manual.engine.disable(&id("eye-strain")).unwrap();

    assert_eq!(expired.engine.snapshot(), manual.engine.snapshot());
}

#[test]
fn test_disable_is_idempotent() {
    let h = Harness::new();
    h.engine.enable(&id("low-focus"), 30).unwrap();

    assert!(h.engine.disable(&id("low-focus")).unwrap().is_some());
    let once = h.engine.snapshot();
    assert!(h.engine.disable(&id("low-focus")).unwrap().is_none());
    assert_eq!(h.engine.snapshot(), once);
}

#[test]
fn test_re_enable_does_not_accumulate() {
    let h = Harness::new();
    h.engine.enable(&id("voice-first"), 10).unwrap();
    h.ticks(3);
    assert_eq!(h.state("voice-first").remaining_secs, Some(7));

    h.engine.enable(&id("voice-first"), 10).unwrap();
    assert_eq!(h.state("voice-first").remaining_secs, Some(10));
    assert_eq!(h.state("voice-first").duration_secs, Some(10));
}

#[test]
fn test_extend_bound() {
    let h = Harness::new();
    h.engine.enable(&id("recovery"), 60).unwrap();
    h.engine.extend(&id("recovery"), 30).unwrap();

    let state = h.state("recovery");
    assert_eq!(state.duration_secs, Some(90));
    assert_eq!(state.remaining_secs, Some(90));
}

#[test]
fn test_extend_on_disabled_mode_is_rejected() {
    let h = Harness::new();
    let before = h.engine.snapshot();

    let err = h.engine.extend(&id("recovery"), 30).unwrap_err();
    assert_eq!(err, ProfileError::NotActive { mode_id: id("recovery") });
    assert_eq!(h.engine.snapshot(), before);
}

#[test]
fn test_pause_freezes_decay() {
    let h = Harness::new();
    h.engine.enable(&id("eye-strain"), 10).unwrap();
    h.engine.pause(&id("eye-strain")).unwrap();

    h.ticks(5);
    assert_eq!(h.state("eye-strain").remaining_secs, Some(10));
    assert_eq!(
        h.engine
            .snapshot()
            .get(&id("eye-strain"))
            .unwrap()
            .progress_pct(),
        Some(100.0)
    );

    h.engine.resume(&id("eye-strain")).unwrap();
    h.ticks(1);
    assert_eq!(h.state("eye-strain").remaining_secs, Some(9));
}

#[test]
fn test_enable_between_ticks_is_not_charged_for_earlier_time() {
    let h = Harness::new();
    h.clock.advance_secs(10);
    h.engine.enable(&id("recovery"), 5).unwrap();

    let events = h.ticks(1);
    assert!(events.is_empty());
    assert_eq!(h.state("recovery").remaining_secs, Some(4));

    h.ticks(3);
    assert!(h.state("recovery").enabled);
    assert!(h.ticks(1)[0].is_expiry());
}

#[test]
fn test_resume_between_ticks_is_not_charged_for_paused_time() {
    let h = Harness::new();
    h.engine.enable(&id("eye-strain"), 10).unwrap();
    h.engine.pause(&id("eye-strain")).unwrap();
    h.clock.advance_secs(5);
    h.engine.resume(&id("eye-strain")).unwrap();

    h.ticks(1);
    assert_eq!(h.state("eye-strain").remaining_secs, Some(9));
}

#[test]
fn test_profiles_started_at_different_times_decay_independently() {
    let h = Harness::new();
    h.engine.enable(&id("low-focus"), 10).unwrap();
    h.clock.advance_secs(3);
    h.engine.enable(&id("voice-first"), 10).unwrap();
    h.clock.advance_secs(2);
    h.engine.tick();

    assert_eq!(h.state("low-focus").remaining_secs, Some(5));
    assert_eq!(h.state("voice-first").remaining_secs, Some(8));
}

#[test]
fn test_paused_profile_can_be_disabled() {
    let h = Harness::new();
    h.engine.enable(&id("eye-strain"), 10).unwrap();
    h.engine.pause(&id("eye-strain")).unwrap();
    h.engine.disable(&id("eye-strain")).unwrap();
    assert_eq!(h.state("eye-strain"), ProfileState::disabled(id("eye-strain")));
}

#[test]
fn test_modes_are_independent() {
    let h = Harness::new();
    h.engine.enable(&id("recovery"), 3).unwrap();
    let voice_before = h.state("voice-first");

    h.engine.enable(&id("low-focus"), 6).unwrap();
    assert_eq!(h.state("recovery").remaining_secs, Some(3));
    assert_eq!(h.state("voice-first"), voice_before);

    h.ticks(3);
    assert!(!h.state("recovery").enabled);
    assert_eq!(h.state("low-focus").remaining_secs, Some(3));

    h.ticks(3);
    assert!(!h.state("low-focus").enabled);
}

#[test]
fn test_simultaneous_expiry_is_ordered() {
    let h = Harness::new();
    let mut rx = h.engine.subscribe();
    h.engine.enable(&id("voice-first"), 2).unwrap();
    h.engine.enable(&id("low-focus"), 2).unwrap();
    h.engine.enable(&id("eye-strain"), 2).unwrap();

    let expired: Vec<ModeId> = h
        .ticks(2)
        .into_iter()
        .filter(Event::is_expiry)
        .map(|e| e.mode_id().clone())
        .collect();
    assert_eq!(expired, vec![id("eye-strain"), id("low-focus"), id("voice-first")]);

    let mut notified = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if event.is_expiry() {
            notified.push(event.mode_id().clone());
        }
    }
    assert_eq!(notified, expired);
}

#[test]
fn test_toggle_uses_default_duration() {
    let h = Harness::new();
    let event = h
        .engine
        .toggle(&id("recovery"), DEFAULT_DURATION_SECS)
        .unwrap()
        .unwrap();
    assert!(matches!(
        event,
        Event::ProfileEnabled {
            duration_secs: 7200,
            restarted: false,
            ..
        }
    ));
    assert_eq!(
        h.engine.snapshot().get(&id("recovery")).unwrap().remaining_label().as_deref(),
        Some("2h 0m")
    );

    h.engine.toggle(&id("recovery"), DEFAULT_DURATION_SECS).unwrap();
    assert!(!h.state("recovery").enabled);
}

#[test]
fn test_error_taxonomy() {
    let h = Harness::new();
    assert_eq!(
        h.engine.enable(&id("recovery"), 0).unwrap_err(),
        ProfileError::InvalidDuration { seconds: 0 }
    );
    assert_eq!(
        h.engine.toggle(&id("recovery"), 0).unwrap_err(),
        ProfileError::InvalidDuration { seconds: 0 }
    );
    assert_eq!(
        h.engine.pause(&id("night-mode")).unwrap_err(),
        ProfileError::UnknownMode { mode_id: id("night-mode") }
    );

    h.engine.enable(&id("recovery"), 5).unwrap();
    assert_eq!(
        h.engine.extend(&id("recovery"), 0).unwrap_err(),
        ProfileError::InvalidDuration { seconds: 0 }
    );
    assert_eq!(h.state("recovery").remaining_secs, Some(5));
}

#[test]
fn test_repeated_commands_never_fail() {
    let h = Harness::new();
    for _ in 0..3 {
        h.engine.disable(&id("recovery")).unwrap();
        h.engine.pause(&id("recovery")).unwrap();
        h.engine.resume(&id("recovery")).unwrap();
    }
    h.engine.enable(&id("recovery"), 5).unwrap();
    for _ in 0..3 {
        h.engine.pause(&id("recovery")).unwrap();
    }
    for _ in 0..3 {
        h.engine.resume(&id("recovery")).unwrap();
    }
    assert!(h.state("recovery").is_running());
}

#[test]
fn test_quick_stats_follow_active_modes() {
    let h = Harness::new();
    h.engine.enable(&id("recovery"), 2).unwrap();
    h.engine.enable(&id("eye-strain"), 10).unwrap();
    assert_eq!(h.engine.snapshot().active_count(), 2);
    assert_eq!(h.engine.snapshot().features_enabled(), 6);

    h.ticks(2);
    assert_eq!(h.engine.snapshot().active_count(), 1);
    assert_eq!(h.engine.snapshot().features_enabled(), 3);
}
