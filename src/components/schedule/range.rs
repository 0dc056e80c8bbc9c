use crate::components::shift::ShiftType;
use crate::error::{Error, ScheduleResult};
use crate::utils::time::parse_iso_date;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::models::ScheduleEntry;

/// Inclusive calendar date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    #[serde(with = "crate::utils::time::iso_date")]
    start: NaiveDate,
    #[serde(with = "crate::utils::time::iso_date")]
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    #[serde(with = "crate::utils::time::iso_date")]
    start: NaiveDate,
    #[serde(with = "crate::utils::time::iso_date")]
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> ScheduleResult<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse two `YYYY-MM-DD` strings into a range
    pub fn parse(start: &str, end: &str) -> ScheduleResult<Self> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    /// A range covering one day
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// `start` through `start + extra_days`, e.g. `extra_days = 6` for a week
    pub fn week_from(start: NaiveDate, extra_days: u32) -> ScheduleResult<Self> {
        let end = start
            .checked_add_signed(Duration::days(i64::from(extra_days)))
            .ok_or_else(|| Error::InvalidDate {
                input: format!("{} + {} days", start, extra_days),
            })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Always false: a range holds at least its start day.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar day in the range, ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// One entry per day of the range, all with the same shift
    pub fn apply(&self, shift: ShiftType) -> Vec<ScheduleEntry> {
        self.days().map(|date| ScheduleEntry::new(date, shift)).collect()
    }
}

/// Assign `shift` to every day from `start` to `end` inclusive.
///
/// Both dates are `YYYY-MM-DD`. When `end` is before `start` nothing is
/// produced and [`Error::InvalidRange`] is returned.
pub fn apply_range(start: &str, end: &str, shift: ShiftType) -> ScheduleResult<Vec<ScheduleEntry>> {
    let range = DateRange::parse(start, end)?;
    Ok(range.apply(shift))
}
