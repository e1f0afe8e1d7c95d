use crate::error::{ExplorerError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

const WEI_PER_NATIVE: u128 = 1_000_000_000_000_000_000;
// Divisor that leaves exactly six fraction digits of a wei amount.
const WEI_PER_MICRO: u128 = 1_000_000_000_000;

pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ExplorerError::Parse(format!("System time error: {e}")))?
        .as_millis();

    // Ensure the timestamp fits in i64
    if duration > i64::MAX as u128 {
        return Err(ExplorerError::Parse("Timestamp overflow".to_string()));
    }

    Ok(duration as i64)
}

/// Format a wei amount as native units with six fraction digits.
pub fn format_native(wei: u128) -> String {
    let whole = wei / WEI_PER_NATIVE;
    let micros = (wei % WEI_PER_NATIVE) / WEI_PER_MICRO;
    format!("{whole}.{micros:06}")
}

/// Render an epoch-millis timestamp relative to `now_ms` ("42s ago").
pub fn format_time_ago(time_ms: i64, now_ms: i64) -> String {
    let seconds = (now_ms - time_ms).max(0) / 1000;
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    format!("{}h ago", minutes / 60)
}
