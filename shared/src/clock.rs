use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::time::Duration;

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant. Used by tests and by the CLI `--at` option.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

const NEAR_MIDNIGHT_SECS: u32 = 120;
const NEAR_MIDNIGHT_INTERVAL: Duration = Duration::from_secs(5);

/// Delay until the next "now" refresh: `base`, or 5 seconds within two minutes
/// of local midnight so the date rolls over promptly.
pub fn next_refresh_delay(now: NaiveDateTime, base: Duration) -> Duration {
    let since_midnight = now.time().num_seconds_from_midnight();
    let until_midnight = 86_400 - since_midnight;
    if since_midnight < NEAR_MIDNIGHT_SECS || until_midnight <= NEAR_MIDNIGHT_SECS {
        NEAR_MIDNIGHT_INTERVAL.min(base)
    } else {
        base
    }
}

/// Current time truncated to minutes, as entered by the "now" button.
pub fn current_minute(clock: &dyn Clock) -> (NaiveDate, NaiveTime) {
    let now = clock.now();
    let time = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(NaiveTime::MIN);
    (now.date(), time)
}
