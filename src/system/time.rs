//! Time keeping module for PineTime

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::{Error, Timestamp};

/// Hour rendering rule selected in the device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockConvention {
    TwelveHour,
    #[default]
    TwentyFourHour,
}

/// Source of the current wall-clock time and the clock convention.
pub trait ClockSource {
    /// Current timestamp in seconds since the Unix epoch.
    fn now(&mut self) -> Result<Timestamp, Error>;

    /// Active clock convention. Read on every refresh, never cached.
    fn clock_convention(&mut self) -> Result<ClockConvention, Error>;
}

/// Converts a timestamp into local calendar fields.
pub trait LocalCalendar {
    fn resolve(&self, timestamp: Timestamp) -> Option<NaiveDateTime>;
}

impl LocalCalendar for FixedOffset {
    fn resolve(&self, timestamp: Timestamp) -> Option<NaiveDateTime> {
        let secs = i64::try_from(timestamp).ok()?;
        let utc = DateTime::from_timestamp(secs, 0)?;
        Some(utc.with_timezone(self).naive_local())
    }
}

/// Seconds to wait from `timestamp` until the next minute boundary.
///
/// Always in `1..=60`, so a tick landing exactly on a boundary schedules the
/// following one instead of firing twice.
pub fn secs_until_next_minute(timestamp: Timestamp) -> u64 {
    60 - timestamp % 60
}

/// Wall-clock reference taken at a known uptime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeReference {
    /// Clock time
    epoch: Timestamp,
    /// Uptime in seconds when `epoch` was valid
    uptime: u64,
}

impl TimeReference {
    /// Create new time reference
    pub fn new(epoch: Timestamp, uptime: u64) -> Self {
        Self { epoch, uptime }
    }

    /// Project the reference to the given uptime.
    ///
    /// An uptime older than the reference yields the reference itself; the
    /// clock never runs backwards because of a stale uptime reading.
    pub fn now(&self, uptime: u64) -> Timestamp {
        self.epoch.saturating_add(uptime.saturating_sub(self.uptime))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn utc_resolves_unix_epoch() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let dt = utc.resolve(0).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1970, 1, 1));
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }

    #[test]
    fn offset_shifts_local_fields() {
        let cet = FixedOffset::east_opt(3_600).unwrap();
        // 2009-02-13 23:31:30 UTC
        let dt = cet.resolve(1_234_567_890).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2009, 2, 14));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 31, 30));

        let west = FixedOffset::west_opt(5 * 3_600).unwrap();
        let dt = west.resolve(1_234_567_890).unwrap();
        assert_eq!((dt.day(), dt.hour()), (13, 18));
    }

    #[test]
    fn out_of_range_timestamp_does_not_resolve() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert!(utc.resolve(u64::MAX).is_none());
        assert!(utc.resolve(i64::MAX as u64).is_none());
    }

    #[test]
    fn next_minute_delay() {
        assert_eq!(secs_until_next_minute(0), 60);
        assert_eq!(secs_until_next_minute(59), 1);
        assert_eq!(secs_until_next_minute(1_234_567_890), 30);
    }

    #[test]
    fn reference_projects_forward() {
        let reference = TimeReference::new(1_700_000_000, 10);
        assert_eq!(reference.now(10), 1_700_000_000);
        assert_eq!(reference.now(75), 1_700_000_065);
        assert_eq!(reference.now(3), 1_700_000_000);
    }
}
