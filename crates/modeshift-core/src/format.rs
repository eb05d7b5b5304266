/// Render a remaining-time value for display.
///
/// `>= 1h` renders as `"{h}h {m}m"`, `>= 1m` as `"{m}m {s}s"`, otherwise `"{s}s"`.
pub fn format_remaining(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
