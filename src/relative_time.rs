//! Human readable relative times ("3 minutes ago", "yesterday", "in 2 hours")

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    fn name(self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }

    /// Word form for -1/0/1 where English has one
    fn phrase(self, value: i64) -> Option<&'static str> {
        match (self, value) {
            (TimeUnit::Second, 0) => Some("now"),
            (TimeUnit::Minute, 0) => Some("this minute"),
            (TimeUnit::Hour, 0) => Some("this hour"),
            (TimeUnit::Day, -1) => Some("yesterday"),
            (TimeUnit::Day, 0) => Some("today"),
            (TimeUnit::Day, 1) => Some("tomorrow"),
            (TimeUnit::Month, -1) => Some("last month"),
            (TimeUnit::Month, 0) => Some("this month"),
            (TimeUnit::Month, 1) => Some("next month"),
            (TimeUnit::Year, -1) => Some("last year"),
            (TimeUnit::Year, 0) => Some("this year"),
            (TimeUnit::Year, 1) => Some("next year"),
            _ => None,
        }
    }
}

/// Largest unit first; a month is a twelfth of a 365 day year
const UNITS: [(TimeUnit, f64); 6] = [
    (TimeUnit::Year, 31_536_000_000.0),
    (TimeUnit::Month, 2_628_000_000.0),
    (TimeUnit::Day, 86_400_000.0),
    (TimeUnit::Hour, 3_600_000.0),
    (TimeUnit::Minute, 60_000.0),
    (TimeUnit::Second, 1_000.0),
];

/// Pick the display unit and rounded value for a signed millisecond delta
pub fn select_unit(elapsed: f64) -> (TimeUnit, i64) {
    let (unit, ms) = UNITS
        .iter()
        .copied()
        .find(|(_, ms)| elapsed.abs() >= *ms)
        .unwrap_or(UNITS[UNITS.len() - 1]);
    // halves round up, like Math.round
    let value = (elapsed / ms + 0.5).floor() as i64;
    (unit, value)
}

/// Format a signed number of units, e.g. (Minute, -2) → "2 minutes ago"
pub fn format_relative(unit: TimeUnit, value: i64) -> String {
    if let Some(phrase) = unit.phrase(value) {
        return phrase.to_string();
    }
    let count = value.unsigned_abs();
    let plural = if count == 1 { "" } else { "s" };
    let amount = format!("{} {}{}", group_thousands(count), unit.name(), plural);
    if value < 0 {
        format!("{} ago", amount)
    } else {
        format!("in {}", amount)
    }
}

/// Relative time for a delta in milliseconds; negative is in the past
pub fn relative_time_from_elapsed(elapsed: f64) -> String {
    let (unit, value) = select_unit(elapsed);
    format_relative(unit, value)
}

/// Relative time of `relative` as seen from `pivot` (both epoch ms)
pub fn relative_time_from_dates(relative: Option<f64>, pivot: f64) -> String {
    match relative {
        Some(relative) => relative_time_from_elapsed(relative - pivot),
        None => String::new(),
    }
}

/// Relative time of an epoch ms timestamp as seen from now
pub fn relative_time_from_epoch(epoch: f64) -> String {
    relative_time_from_dates(Some(epoch), now_ms())
}

/// Current time in epoch milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current time in epoch milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or_default()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
