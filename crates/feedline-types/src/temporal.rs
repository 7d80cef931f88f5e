use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A UTC instant.
///
/// Ordering is chronological. Serialized as an RFC 3339 string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Build from milliseconds since the UNIX epoch.
    pub fn from_unix_millis(ms: i64) -> Result<Self, TypeError> {
        Utc.timestamp_millis_opt(ms)
            .single()
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimestamp(format!("{ms}ms out of range")))
    }

    /// Parse an RFC 3339 string such as `2024-05-01T12:00:00Z`.
    pub fn parse_rfc3339(s: &str) -> Result<Self, TypeError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TypeError::InvalidTimestamp(format!("{s}: {e}")))
    }

    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// This instant shifted forward by `by`.
    pub fn plus(&self, by: Duration) -> Self {
        Self(self.0 + by)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock UTC time that never runs backwards.
///
/// If the system clock steps back, the last returned instant is repeated
/// until wall time catches up. Ties are resolved by the caller (post ids
/// break timestamp ties in the feed order).
#[derive(Default)]
pub struct SystemClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = Utc::now();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let next = match *last {
            Some(prev) if prev > wall => prev,
            _ => wall,
        };
        *last = Some(next);
        Timestamp(next)
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// A clock starting at 2024-01-01T00:00:00Z.
    pub fn starting_at_epoch_2024() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        Self::new(Timestamp(start))
    }

    /// Move the clock forward and return the new time.
    pub fn advance(&self, by: Duration) -> Timestamp {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = current.plus(by);
        *current
    }

    pub fn set(&self, to: Timestamp) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_chronological() {
        let a = Timestamp::from_unix_millis(1_000).unwrap();
        let b = Timestamp::from_unix_millis(2_000).unwrap();
        assert!(a < b);
        assert_eq!(a.plus(Duration::seconds(1)), b);
    }

    #[test]
    fn display_is_rfc3339_utc() {
        let ts = Timestamp::from_unix_millis(0).unwrap();
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn parse_rfc3339_normalizes_offset() {
        let ts = Timestamp::parse_rfc3339("2024-05-01T14:00:00+02:00").unwrap();
        assert_eq!(ts, Timestamp::parse_rfc3339("2024-05-01T12:00:00Z").unwrap());
        assert!(Timestamp::parse_rfc3339("yesterday").is_err());
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let mut prev = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn system_clock_is_recent() {
        // After 2020-01-01.
        assert!(SystemClock::new().now().unix_millis() > 1_577_836_800_000);
    }

    #[test]
    fn manual_clock_advances_only_on_request() {
        let clock = ManualClock::starting_at_epoch_2024();
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        let t1 = clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), t1);
        assert_eq!(t1.unix_millis() - t0.unix_millis(), 300_000);

        clock.set(t0);
        assert_eq!(clock.now(), t0);
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::parse_rfc3339("2024-03-10T08:30:00.250Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
