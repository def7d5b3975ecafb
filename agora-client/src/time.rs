use crate::api::Time;

fn div_round(a: i64, b: i64) -> i64 {
    (a + b / 2) / b
}

fn ago(n: i64, unit: &str) -> String {
    match n {
        1 => format!("1 {unit} ago"),
        n => format!("{n} {unit}s ago"),
    }
}

/// Formats `then` relative to `now`, eg. "3 hours ago"
///
/// Timestamps in the future (clock skew with the collaborator) read as "just now".
pub fn relative_time(then: &Time, now: &Time) -> String {
    let secs = (*now - *then).num_seconds();
    // rounding never reaches the bound of the bucket
    let mins = div_round(secs, 60).min(44);
    let hours = div_round(secs, 60 * 60).min(23);
    let days = div_round(secs, 24 * 60 * 60).min(29);
    match secs {
        s if s < 45 => String::from("just now"),
        s if s < 90 => ago(1, "minute"),
        s if s < 45 * 60 => ago(mins, "minute"),
        s if s < 90 * 60 => ago(1, "hour"),
        s if s < 24 * 60 * 60 => ago(hours, "hour"),
        s if s < 42 * 60 * 60 => ago(1, "day"),
        s if s < 30 * 24 * 60 * 60 => ago(days, "day"),
        s if s < 45 * 24 * 60 * 60 => ago(1, "month"),
        s if s < 365 * 24 * 60 * 60 => ago(div_round(secs, 30 * 24 * 60 * 60).min(11), "month"),
        _ => ago((secs / (365 * 24 * 60 * 60)).max(1), "year"),
    }
}
