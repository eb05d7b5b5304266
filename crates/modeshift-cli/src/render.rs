//! Human-readable output for the interactive session.

use modeshift_core::{format_remaining, DisableReason, Event, ProfileView, Snapshot};

const BAR_WIDTH: usize = 20;

/// Active modes with their countdowns, followed by quick stats.
pub fn status(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    if snapshot.active_count() == 0 {
        out.push_str("No Active Profiles\n");
        out.push_str("Choose accessibility modes to get started\n");
    } else {
        out.push_str("Active Modes\n");
        for view in snapshot.active() {
            out.push_str(&active_line(view));
            out.push('\n');
            if !view.mode.features.is_empty() {
                out.push_str(&format!("    {}\n", view.mode.features.join(" · ")));
            }
        }
    }

    out.push_str(&format!(
        "{} active · {} features enabled",
        snapshot.active_count(),
        snapshot.features_enabled()
    ));
    out
}

fn active_line(view: &ProfileView) -> String {
    let remaining = view.remaining_label().unwrap_or_default();
    let bar = progress_bar(view.progress_pct().unwrap_or(0.0));
    let paused = if view.state.paused { "  (paused)" } else { "" };
    format!("  {:<18} {:>8}  {bar}{paused}", view.mode.name, remaining)
}

fn progress_bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// One-line notice for an event.
pub fn event(event: &Event) -> String {
    match event {
        Event::ProfileEnabled {
            mode_id,
            duration_secs,
            restarted,
            ..
        } => {
            let verb = if *restarted { "restarted" } else { "enabled" };
            format!("{mode_id} {verb} for {}", format_remaining(*duration_secs))
        }
        Event::ProfileDisabled {
            mode_id,
            reason: DisableReason::User,
            ..
        } => format!("{mode_id} disabled"),
        Event::ProfileDisabled {
            mode_id,
            reason: DisableReason::Expired,
            ..
        } => format!("{mode_id} expired"),
        Event::ProfileExtended {
            mode_id,
            delta_secs,
            remaining_secs,
            ..
        } => format!(
            "{mode_id} extended by {}, {} left",
            format_remaining(*delta_secs),
            format_remaining(*remaining_secs)
        ),
        Event::ProfilePaused {
            mode_id,
            remaining_secs,
            ..
        } => format!("{mode_id} paused with {} left", format_remaining(*remaining_secs)),
        Event::ProfileResumed {
            mode_id,
            remaining_secs,
            ..
        } => format!("{mode_id} resumed, {} left", format_remaining(*remaining_secs)),
    }
}
