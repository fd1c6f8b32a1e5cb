use chrono::Local;

/// Wall-clock stamp prefixed to test names when the timer is on
pub fn now_stamp() -> String {
    Local::now().format("[%H:%M:%S]").to_string()
}

/// Seconds since the epoch, with sub-second precision
pub fn now_epoch_secs() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}

/// Elapsed-time suffix for an `ok` line.
///
/// High resolution prints milliseconds as a three-place fraction; otherwise
/// whole seconds go in an eight-wide field, with `<1` for anything shorter.
pub fn format_elapsed(elapsed: f64, hires: bool) -> String {
    if hires {
        return format!(" {:.3} s", elapsed);
    }
    let secs = elapsed.trunc() as i64;
    let field = if secs == 0 {
        "<1".to_string()
    } else {
        secs.to_string()
    };
    format!(" {:>8} s", field)
}
