use chrono::{DateTime, FixedOffset, Offset, Utc};

use ledger_domain::PeriodKey;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the calendar month containing `now()` as observed at `offset`.
    fn current_period(&self, offset: FixedOffset) -> PeriodKey {
        PeriodKey::containing(&self.now().with_timezone(&offset))
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds the reporting offset from a minute count, falling back to UTC when out of range.
pub fn reporting_offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(utc_offset)
}

pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}
