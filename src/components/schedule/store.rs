use super::models::{ScheduleEntry, ScheduleSnapshot, UserSchedule};
use crate::error::ScheduleResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Storage for per-user schedules and declared work types.
///
/// Writes for the same date replace whatever was there; a user never has two
/// entries for one date.
#[async_trait]
pub trait ScheduleStore: Send + Sync + 'static {
    /// Get a user's schedule, empty if the user is unknown
    async fn get_schedule(&self, user: &str) -> ScheduleResult<UserSchedule>;

    /// Merge entries into a user's schedule. Returns how many dates were overwritten.
    async fn merge_entries(&self, user: &str, entries: &[ScheduleEntry]) -> ScheduleResult<usize>;

    /// Remove one day from a user's schedule
    async fn clear_day(&self, user: &str, date: NaiveDate) -> ScheduleResult<bool>;

    /// Replace a user's whole schedule
    async fn replace_schedule(&self, user: &str, schedule: UserSchedule) -> ScheduleResult<()>;

    /// Raw work type string as stored at onboarding, if any
    async fn get_work_type(&self, user: &str) -> ScheduleResult<Option<String>>;

    async fn set_work_type(&self, user: &str, work_type: &str) -> ScheduleResult<()>;

    /// List all users with a schedule or a work type
    async fn list_users(&self) -> ScheduleResult<Vec<String>>;

    /// Delete everything stored for a user
    async fn delete_user(&self, user: &str) -> ScheduleResult<()>;
}

/// In-memory implementation of the store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    schedules: RwLock<HashMap<String, UserSchedule>>,
    work_types: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a persisted snapshot for one user
    pub fn from_snapshot(user: &str, snapshot: &ScheduleSnapshot) -> ScheduleResult<Self> {
        let schedule = UserSchedule::from_snapshot(snapshot)?;
        let schedules = HashMap::from([(user.to_string(), schedule)]);

        Ok(Self {
            schedules: RwLock::new(schedules),
            work_types: RwLock::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn get_schedule(&self, user: &str) -> ScheduleResult<UserSchedule> {
        let schedules = self.schedules.read().await;
        Ok(schedules.get(user).cloned().unwrap_or_default())
    }

    async fn merge_entries(&self, user: &str, entries: &[ScheduleEntry]) -> ScheduleResult<usize> {
        let mut schedules = self.schedules.write().await;
        let schedule = schedules.entry(user.to_string()).or_default();
        let overwritten = schedule.merge(entries.iter().copied());

        debug!(
            "Merged {} entries for {} ({} overwritten)",
            entries.len(),
            user,
            overwritten
        );
        Ok(overwritten)
    }

    async fn clear_day(&self, user: &str, date: NaiveDate) -> ScheduleResult<bool> {
        let mut schedules = self.schedules.write().await;
        Ok(schedules
            .get_mut(user)
            .and_then(|schedule| schedule.clear_day(date))
            .is_some())
    }

    async fn replace_schedule(&self, user: &str, schedule: UserSchedule) -> ScheduleResult<()> {
        let mut schedules = self.schedules.write().await;
        schedules.insert(user.to_string(), schedule);
        Ok(())
    }

    async fn get_work_type(&self, user: &str) -> ScheduleResult<Option<String>> {
        let work_types = self.work_types.read().await;
        Ok(work_types.get(user).cloned())
    }

    async fn set_work_type(&self, user: &str, work_type: &str) -> ScheduleResult<()> {
        let mut work_types = self.work_types.write().await;
        work_types.insert(user.to_string(), work_type.to_string());
        Ok(())
    }

    async fn list_users(&self) -> ScheduleResult<Vec<String>> {
        let schedules = self.schedules.read().await;
        let work_types = self.work_types.read().await;

        let mut users: Vec<String> = schedules
            .keys()
            .chain(work_types.keys())
            .cloned()
            .collect();
        users.sort();
        users.dedup();
        Ok(users)
    }

    async fn delete_user(&self, user: &str) -> ScheduleResult<()> {
        self.schedules.write().await.remove(user);
        self.work_types.write().await.remove(user);

        info!("Deleted schedule for {}", user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::range::apply_range;
    use crate::components::shift::ShiftType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_merge_overwrites_per_date() {
        let store = InMemoryStore::new();

        let nights = apply_range("2026-01-01", "2026-01-03", ShiftType::Night).unwrap();
        assert_eq!(store.merge_entries("alice", &nights).await.unwrap(), 0);

        let off = apply_range("2026-01-02", "2026-01-02", ShiftType::Off).unwrap();
        assert_eq!(store.merge_entries("alice", &off).await.unwrap(), 1);

        let schedule = store.get_schedule("alice").await.unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.get(date(2026, 1, 1)), Some(ShiftType::Night));
        assert_eq!(schedule.get(date(2026, 1, 2)), Some(ShiftType::Off));
        assert_eq!(schedule.get(date(2026, 1, 3)), Some(ShiftType::Night));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = InMemoryStore::new();
        let days = apply_range("2026-01-01", "2026-01-02", ShiftType::Day).unwrap();
        store.merge_entries("alice", &days).await.unwrap();
        store.set_work_type("bob", "fixed_night").await.unwrap();

        assert!(store.get_schedule("bob").await.unwrap().is_empty());
        assert_eq!(store.list_users().await.unwrap(), vec!["alice", "bob"]);
        assert_eq!(
            store.get_work_type("bob").await.unwrap().as_deref(),
            Some("fixed_night")
        );
        assert_eq!(store.get_work_type("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_and_delete() {
        let store = InMemoryStore::new();
        let days = apply_range("2026-01-01", "2026-01-02", ShiftType::Day).unwrap();
        store.merge_entries("alice", &days).await.unwrap();

        assert!(store.clear_day("alice", date(2026, 1, 1)).await.unwrap());
        assert!(!store.clear_day("alice", date(2026, 1, 1)).await.unwrap());
        assert!(!store.clear_day("nobody", date(2026, 1, 1)).await.unwrap());
        assert_eq!(store.get_schedule("alice").await.unwrap().len(), 1);

        store.delete_user("alice").await.unwrap();
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_snapshot() {
        let mut snapshot = ScheduleSnapshot::new();
        snapshot.insert("2026-01-01".to_string(), ShiftType::Night);
        let store = InMemoryStore::from_snapshot("alice", &snapshot).unwrap();

        let schedule = store.get_schedule("alice").await.unwrap();
        assert_eq!(schedule.get(date(2026, 1, 1)), Some(ShiftType::Night));
    }
}
