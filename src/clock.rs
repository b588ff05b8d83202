use chrono::{DateTime, Duration, Utc};

/// Source of "now" for round timing and history timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Seconds between two instants at the full precision chrono keeps.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}

/// True once strictly more than `limit_secs` have passed since `start`.
pub fn is_past_limit(start: DateTime<Utc>, now: DateTime<Utc>, limit_secs: u32) -> bool {
    now - start > Duration::seconds(i64::from(limit_secs))
}
