use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ConfigError;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Daily cutoff after which earlier queue memberships stop counting as active.
#[derive(Debug, Clone, Copy)]
pub struct DailyReset {
    tz: Tz,
    hour: u32,
}

impl DailyReset {
    pub fn new(tz: Tz, hour: u32) -> Result<Self, ConfigError> {
        if hour > 23 {
            return Err(ConfigError::InvalidResetHour(hour));
        }
        Ok(Self { tz, hour })
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Most recent boundary at or before `now`.
    pub fn most_recent(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.with_timezone(&self.tz).date_naive();
        let boundary = self.boundary_on(today);
        if boundary <= now {
            return boundary;
        }
        match today.pred_opt() {
            Some(yesterday) => self.boundary_on(yesterday),
            None => boundary,
        }
    }

    pub fn is_active(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at >= self.most_recent(now)
    }

    fn boundary_on(&self, date: NaiveDate) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or(NaiveTime::MIN);
        resolve_local(self.tz, date.and_time(time))
    }
}

// Ambiguous wall-clock times take the earlier instant; times inside a DST gap
// roll forward until they exist.
fn resolve_local(tz: Tz, mut local: NaiveDateTime) -> DateTime<Utc> {
    loop {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => local += Duration::hours(1),
        }
    }
}
