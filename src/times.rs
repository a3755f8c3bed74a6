//! Crack-time estimation under fixed attacker profiles.

use crate::types::{CrackTimesDisplay, CrackTimesSeconds};

const ONLINE_THROTTLED_PER_SECOND: f64 = 100.0 / 3600.0;
const ONLINE_UNTHROTTLED_PER_SECOND: f64 = 10.0;
const OFFLINE_SLOW_HASH_PER_SECOND: f64 = 1e4;
const OFFLINE_FAST_HASH_PER_SECOND: f64 = 1e10;

/// Convert a guess count into per-profile crack times.
pub fn estimate_attack_times(guesses: f64) -> (CrackTimesSeconds, CrackTimesDisplay) {
    let seconds = CrackTimesSeconds {
        online_throttling_100_per_hour: guesses / ONLINE_THROTTLED_PER_SECOND,
        online_no_throttling_10_per_second: guesses / ONLINE_UNTHROTTLED_PER_SECOND,
        offline_slow_hashing_1e4_per_second: guesses / OFFLINE_SLOW_HASH_PER_SECOND,
        offline_fast_hashing_1e10_per_second: guesses / OFFLINE_FAST_HASH_PER_SECOND,
    };
    let display = CrackTimesDisplay {
        online_throttling_100_per_hour: display_time(
            seconds.online_throttling_100_per_hour,
        ),
        online_no_throttling_10_per_second: display_time(
            seconds.online_no_throttling_10_per_second,
        ),
        offline_slow_hashing_1e4_per_second: display_time(
            seconds.offline_slow_hashing_1e4_per_second,
        ),
        offline_fast_hashing_1e10_per_second: display_time(
            seconds.offline_fast_hashing_1e10_per_second,
        ),
    };
    (seconds, display)
}

/// Humanize a duration in seconds.
pub fn display_time(seconds: f64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;
    const MONTH: f64 = DAY * 31.0;
    const YEAR: f64 = MONTH * 12.0;
    const CENTURY: f64 = YEAR * 100.0;

    if seconds < 1.0 {
        "less than a second".to_string()
    } else if seconds < MINUTE {
        plural(seconds, "second")
    } else if seconds < HOUR {
        plural(seconds / MINUTE, "minute")
    } else if seconds < DAY {
        plural(seconds / HOUR, "hour")
    } else if seconds < MONTH {
        plural(seconds / DAY, "day")
    } else if seconds < YEAR {
        plural(seconds / MONTH, "month")
    } else if seconds < CENTURY {
        plural(seconds / YEAR, "year")
    } else {
        "centuries".to_string()
    }
}

fn plural(amount: f64, unit: &str) -> String {
    let amount = amount.round() as u64;
    if amount == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", amount, unit)
    }
}
