//! Recurring weekly time points and opening intervals.

use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
pub const DAYS_PER_WEEK: i64 = 7;

/// A point in a recurring weekly schedule.
///
/// `day` counts from the start of the upstream week (0 = Sunday). Values are
/// kept as signed integers so that out-of-range inputs can still be compared
/// with the same linear arithmetic instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekTime {
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
}

impl WeekTime {
    pub const fn new(day: i64, hour: i64, minute: i64) -> Self {
        Self { day, hour, minute }
    }

    /// Linear week-minutes: `day * 1440 + hour * 60 + minute`.
    pub fn linear_minutes(&self) -> i64 {
        self.day
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(self.hour.saturating_mul(MINUTES_PER_HOUR))
            .saturating_add(self.minute)
    }

    /// Whether every component lies in its nominal calendar range.
    pub fn is_nominal(&self) -> bool {
        (0..DAYS_PER_WEEK).contains(&self.day)
            && (0..24).contains(&self.hour)
            && (0..MINUTES_PER_HOUR).contains(&self.minute)
    }
}

/// A half-open `[start, end)` window during which a location is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenInterval {
    pub start: WeekTime,
    pub end: WeekTime,
}

impl OpenInterval {
    pub const fn new(start: WeekTime, end: WeekTime) -> Self {
        Self { start, end }
    }

    /// `start <= t < end` in linear week-minutes.
    ///
    /// An interval crossing the week boundary (end before start) never
    /// contains anything.
    pub fn contains(&self, t: WeekTime) -> bool {
        let t = t.linear_minutes();
        self.start.linear_minutes() <= t && t < self.end.linear_minutes()
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end
            .linear_minutes()
            .saturating_sub(self.start.linear_minutes())
    }

    /// `end` strictly after `start`.
    pub fn is_well_formed(&self) -> bool {
        self.duration_minutes() > 0
    }
}
