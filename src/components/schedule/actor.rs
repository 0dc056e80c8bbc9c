use super::cleanup::{cleanup_invalid_entries, CleanupReport};
use super::models::{ScheduleEntry, UserSchedule};
use super::range::DateRange;
use super::store::ScheduleStore;
use crate::components::shift::{ShiftType, WorkType};
use crate::error::{store_error, Error, ScheduleResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

pub type Reply<T> = oneshot::Sender<ScheduleResult<T>>;

/// Commands that can be sent to the schedule actor
pub enum ScheduleCommand {
    RegisterWorkType(String, String, Reply<WorkType>),
    ApplyRange(String, DateRange, ShiftType, Reply<Vec<ScheduleEntry>>),
    SetDay(String, NaiveDate, ShiftType, Reply<Option<ShiftType>>),
    ClearDay(String, NaiveDate, Reply<bool>),
    GetSchedule(String, Reply<UserSchedule>),
    GetRange(String, DateRange, Reply<Vec<ScheduleEntry>>),
    Cleanup(String, bool, Reply<CleanupReport>),
    Shutdown,
}

/// Handle for communicating with the schedule actor
#[derive(Clone)]
pub struct ScheduleActorHandle {
    command_tx: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleActorHandle {
    /// Send a command and wait for its reply
    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> ScheduleCommand,
    ) -> ScheduleResult<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| store_error("Response channel closed"))?
    }

    pub async fn register_work_type(
        &self,
        user: impl Into<String>,
        work_type: impl Into<String>,
    ) -> ScheduleResult<WorkType> {
        let (user, work_type) = (user.into(), work_type.into());
        self.request(|tx| ScheduleCommand::RegisterWorkType(user, work_type, tx))
            .await
    }

    pub async fn apply_range(
        &self,
        user: impl Into<String>,
        range: DateRange,
        shift: ShiftType,
    ) -> ScheduleResult<Vec<ScheduleEntry>> {
        let user = user.into();
        self.request(|tx| ScheduleCommand::ApplyRange(user, range, shift, tx))
            .await
    }

    pub async fn set_day(
        &self,
        user: impl Into<String>,
        date: NaiveDate,
        shift: ShiftType,
    ) -> ScheduleResult<Option<ShiftType>> {
        let user = user.into();
        self.request(|tx| ScheduleCommand::SetDay(user, date, shift, tx))
            .await
    }

    pub async fn clear_day(&self, user: impl Into<String>, date: NaiveDate) -> ScheduleResult<bool> {
        let user = user.into();
        self.request(|tx| ScheduleCommand::ClearDay(user, date, tx))
            .await
    }

    pub async fn get_schedule(&self, user: impl Into<String>) -> ScheduleResult<UserSchedule> {
        let user = user.into();
        self.request(|tx| ScheduleCommand::GetSchedule(user, tx))
            .await
    }

    pub async fn get_range(
        &self,
        user: impl Into<String>,
        range: DateRange,
    ) -> ScheduleResult<Vec<ScheduleEntry>> {
        let user = user.into();
        self.request(|tx| ScheduleCommand::GetRange(user, range, tx))
            .await
    }

    pub async fn cleanup(
        &self,
        user: impl Into<String>,
        dry_run: bool,
    ) -> ScheduleResult<CleanupReport> {
        let user = user.into();
        self.request(|tx| ScheduleCommand::Cleanup(user, dry_run, tx))
            .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        let _ = self.command_tx.send(ScheduleCommand::Shutdown).await;
        Ok(())
    }
}

/// The schedule actor. Owns the store and applies commands one at a time,
/// so every write for a user is serialised.
pub struct ScheduleActor<S: ScheduleStore> {
    store: Arc<S>,
    command_rx: mpsc::Receiver<ScheduleCommand>,
}

impl<S: ScheduleStore> ScheduleActor<S> {
    /// Create a new actor and return its handle
    pub fn new(store: Arc<S>, mailbox_size: usize) -> (Self, ScheduleActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(mailbox_size);

        let actor = Self { store, command_rx };
        let handle = ScheduleActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Schedule actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                ScheduleCommand::RegisterWorkType(user, work_type, tx) => {
                    let _ = tx.send(self.register_work_type(&user, &work_type).await);
                }
                ScheduleCommand::ApplyRange(user, range, shift, tx) => {
                    let _ = tx.send(self.apply_range(&user, range, shift).await);
                }
                ScheduleCommand::SetDay(user, date, shift, tx) => {
                    let _ = tx.send(self.set_day(&user, date, shift).await);
                }
                ScheduleCommand::ClearDay(user, date, tx) => {
                    let _ = tx.send(self.store.clear_day(&user, date).await);
                }
                ScheduleCommand::GetSchedule(user, tx) => {
                    let _ = tx.send(self.store.get_schedule(&user).await);
                }
                ScheduleCommand::GetRange(user, range, tx) => {
                    let result = self
                        .store
                        .get_schedule(&user)
                        .await
                        .map(|schedule| schedule.entries_in(&range));
                    let _ = tx.send(result);
                }
                ScheduleCommand::Cleanup(user, dry_run, tx) => {
                    let _ = tx.send(self.cleanup(&user, dry_run).await);
                }
                ScheduleCommand::Shutdown => {
                    info!("Schedule actor shutting down");
                    break;
                }
            }
        }

        info!("Schedule actor shut down");
    }

    /// Work type for a user. Missing or unrecognised values resolve to irregular.
    async fn work_type_for(&self, user: &str) -> ScheduleResult<WorkType> {
        let raw = self.store.get_work_type(user).await?;
        let work_type = raw
            .as_deref()
            .map(WorkType::from_str_lenient)
            .unwrap_or_default();

        debug!("Resolved work type {:?} for {} to {}", raw, user, work_type);
        Ok(work_type)
    }

    async fn ensure_allowed(&self, user: &str, shift: ShiftType) -> ScheduleResult<()> {
        let work_type = self.work_type_for(user).await?;
        if !work_type.allows(shift) {
            return Err(Error::ShiftNotAllowed {
                work_type: work_type.to_string(),
                shift: shift.to_string(),
            });
        }
        Ok(())
    }

    async fn register_work_type(&self, user: &str, work_type: &str) -> ScheduleResult<WorkType> {
        self.store.set_work_type(user, work_type).await?;
        let resolved = WorkType::from_str_lenient(work_type);
        info!("Registered work type {} for {}", resolved, user);
        Ok(resolved)
    }

    async fn apply_range(
        &self,
        user: &str,
        range: DateRange,
        shift: ShiftType,
    ) -> ScheduleResult<Vec<ScheduleEntry>> {
        self.ensure_allowed(user, shift).await?;

        let entries = range.apply(shift);
        let overwritten = self.store.merge_entries(user, &entries).await?;

        info!(
            "Applied {} to {} days ({} - {}) for {}, {} overwritten",
            shift,
            entries.len(),
            range.start(),
            range.end(),
            user,
            overwritten
        );
        Ok(entries)
    }

    async fn set_day(
        &self,
        user: &str,
        date: NaiveDate,
        shift: ShiftType,
    ) -> ScheduleResult<Option<ShiftType>> {
        self.ensure_allowed(user, shift).await?;

        let previous = self.store.get_schedule(user).await?.get(date);
        self.store
            .merge_entries(user, &[ScheduleEntry::new(date, shift)])
            .await?;
        Ok(previous)
    }

    async fn cleanup(&self, user: &str, dry_run: bool) -> ScheduleResult<CleanupReport> {
        let work_type = self.work_type_for(user).await?;
        let mut schedule = self.store.get_schedule(user).await?;

        let report = cleanup_invalid_entries(work_type, &mut schedule, dry_run);
        if report.rewritten > 0 {
            self.store.replace_schedule(user, schedule).await?;
        }
        Ok(report)
    }
}
