use super::actor::{ScheduleActor, ScheduleActorHandle};
use super::cleanup::CleanupReport;
use super::models::{ScheduleEntry, UserSchedule};
use super::range::DateRange;
use super::store::ScheduleStore;
use crate::components::shift::{ShiftType, WorkType};
use crate::error::ScheduleResult;
use crate::utils::time::parse_iso_date;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Default capacity of the actor mailbox
pub const DEFAULT_MAILBOX_SIZE: usize = 32;

/// Handle for interacting with the schedule actor
#[derive(Clone)]
pub struct ScheduleHandle {
    actor_handle: ScheduleActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Create a new ScheduleHandle and spawn the actor. Must be called inside a tokio runtime.
    pub fn new<S: ScheduleStore>(store: Arc<S>) -> Self {
        let (mut actor, handle) = ScheduleActor::new(store, DEFAULT_MAILBOX_SIZE);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Record the work type a user chose during onboarding
    pub async fn register_work_type(
        &self,
        user: impl Into<String>,
        work_type: impl Into<String>,
    ) -> ScheduleResult<WorkType> {
        self.actor_handle.register_work_type(user, work_type).await
    }

    /// Apply one shift to every day of a range. Rejected without any write
    /// when the shift is not allowed for the user's work type.
    pub async fn apply_range(
        &self,
        user: impl Into<String>,
        range: DateRange,
        shift: ShiftType,
    ) -> ScheduleResult<Vec<ScheduleEntry>> {
        self.actor_handle.apply_range(user, range, shift).await
    }

    /// Same as [`ScheduleHandle::apply_range`] with `YYYY-MM-DD` inputs
    pub async fn apply_range_str(
        &self,
        user: impl Into<String>,
        start: &str,
        end: &str,
        shift: ShiftType,
    ) -> ScheduleResult<Vec<ScheduleEntry>> {
        let range = DateRange::parse(start, end)?;
        self.apply_range(user, range, shift).await
    }

    /// Edit a single day. Returns the shift it replaced.
    pub async fn set_day(
        &self,
        user: impl Into<String>,
        date: NaiveDate,
        shift: ShiftType,
    ) -> ScheduleResult<Option<ShiftType>> {
        self.actor_handle.set_day(user, date, shift).await
    }

    pub async fn clear_day(&self, user: impl Into<String>, date: &str) -> ScheduleResult<bool> {
        let date = parse_iso_date(date)?;
        self.actor_handle.clear_day(user, date).await
    }

    pub async fn get_schedule(&self, user: impl Into<String>) -> ScheduleResult<UserSchedule> {
        self.actor_handle.get_schedule(user).await
    }

    /// Stored entries for a user inside a range
    pub async fn get_range(
        &self,
        user: impl Into<String>,
        range: DateRange,
    ) -> ScheduleResult<Vec<ScheduleEntry>> {
        self.actor_handle.get_range(user, range).await
    }

    /// Sweep a user's schedule for shifts their work type does not allow
    pub async fn cleanup(
        &self,
        user: impl Into<String>,
        dry_run: bool,
    ) -> ScheduleResult<CleanupReport> {
        self.actor_handle.cleanup(user, dry_run).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        self.actor_handle.shutdown().await
    }
}
