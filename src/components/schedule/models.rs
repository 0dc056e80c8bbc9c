use crate::components::shift::ShiftType;
use crate::error::ScheduleResult;
use crate::utils::time::{format_iso_date, iso_date, parse_iso_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::range::DateRange;

/// One date-to-shift assignment in a user's calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub shift: ShiftType,
}

impl ScheduleEntry {
    pub fn new(date: NaiveDate, shift: ShiftType) -> Self {
        Self { date, shift }
    }

    /// Format the entry as "YYYY-MM-DD: label"
    pub fn format(&self) -> String {
        format!("{}: {}", format_iso_date(self.date), self.shift.full_label())
    }
}

/// Persisted shape of a schedule: ISO date string to shift type
pub type ScheduleSnapshot = BTreeMap<String, ShiftType>;

/// A single user's schedule, at most one shift per date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSchedule {
    days: BTreeMap<NaiveDate, ShiftType>,
}

impl UserSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge entries into the schedule, overwriting any existing shift on
    /// the same date. Returns how many dates already had a shift.
    pub fn merge<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = ScheduleEntry>,
    {
        let mut overwritten = 0;
        for entry in entries {
            if self.days.insert(entry.date, entry.shift).is_some() {
                overwritten += 1;
            }
        }
        overwritten
    }

    /// Assign a single day. Returns the previous shift, if any.
    pub fn set_day(&mut self, date: NaiveDate, shift: ShiftType) -> Option<ShiftType> {
        self.days.insert(date, shift)
    }

    /// Remove the assignment for a day. Returns the removed shift, if any.
    pub fn clear_day(&mut self, date: NaiveDate) -> Option<ShiftType> {
        self.days.remove(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<ShiftType> {
        self.days.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// All entries in ascending date order
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        self.days
            .iter()
            .map(|(date, shift)| ScheduleEntry::new(*date, *shift))
            .collect()
    }

    /// Entries that fall inside `range`, ascending. Days without a shift are skipped.
    pub fn entries_in(&self, range: &DateRange) -> Vec<ScheduleEntry> {
        self.days
            .range(range.start()..=range.end())
            .map(|(date, shift)| ScheduleEntry::new(*date, *shift))
            .collect()
    }

    /// Entries on or after `from` and on or before `to`, ascending. A missing
    /// bound leaves that side open. Bounds that cross give no entries.
    pub fn entries_between(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<ScheduleEntry> {
        self.days
            .iter()
            .filter(|(date, _)| from.map_or(true, |from| **date >= from))
            .filter(|(date, _)| to.map_or(true, |to| **date <= to))
            .map(|(date, shift)| ScheduleEntry::new(*date, *shift))
            .collect()
    }

    pub fn snapshot(&self) -> ScheduleSnapshot {
        self.days
            .iter()
            .map(|(date, shift)| (format_iso_date(*date), *shift))
            .collect()
    }

    pub fn from_snapshot(snapshot: &ScheduleSnapshot) -> ScheduleResult<Self> {
        let mut schedule = Self::new();
        for (date, shift) in snapshot {
            schedule.set_day(parse_iso_date(date)?, *shift);
        }
        Ok(schedule)
    }
}
