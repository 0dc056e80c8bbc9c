use super::models::{ScheduleEntry, UserSchedule};
use crate::components::shift::{ShiftType, WorkType};
use rust_i18n::t;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of sweeping a schedule for shifts its work type does not allow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub work_type: WorkType,
    pub inspected: usize,
    pub invalid: Vec<ScheduleEntry>,
    pub rewritten: usize,
    pub dry_run: bool,
}

impl CleanupReport {
    /// One-line summary in the current locale
    pub fn summary(&self) -> String {
        let summary = t!(
            "cleanup_summary",
            inspected = self.inspected,
            invalid = self.invalid.len(),
            rewritten = self.rewritten
        );
        if self.dry_run {
            format!("{} ({})", summary, t!("cleanup_dry_run"))
        } else {
            summary.to_string()
        }
    }
}

/// Entries whose shift is not allowed for `work_type`, ascending by date
pub fn find_invalid_entries(work_type: WorkType, schedule: &UserSchedule) -> Vec<ScheduleEntry> {
    schedule
        .entries()
        .into_iter()
        .filter(|entry| !work_type.allows(entry.shift))
        .collect()
}

/// Rewrite every disallowed shift to `off`.
///
/// With `dry_run` the schedule is left untouched and the report only lists
/// what would change.
pub fn cleanup_invalid_entries(
    work_type: WorkType,
    schedule: &mut UserSchedule,
    dry_run: bool,
) -> CleanupReport {
    let invalid = find_invalid_entries(work_type, schedule);

    let rewritten = if dry_run || invalid.is_empty() {
        0
    } else {
        for entry in &invalid {
            warn!(
                "Rewriting {} shift on {} to off ({} does not allow it)",
                entry.shift, entry.date, work_type
            );
            schedule.set_day(entry.date, ShiftType::Off);
        }
        invalid.len()
    };

    info!(
        "Cleanup for {}: {} inspected, {} invalid, {} rewritten",
        work_type,
        schedule.len(),
        invalid.len(),
        rewritten
    );

    CleanupReport {
        work_type,
        inspected: schedule.len(),
        invalid,
        rewritten,
        dry_run,
    }
}
