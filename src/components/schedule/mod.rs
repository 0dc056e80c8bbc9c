mod actor;
pub mod cleanup;
mod handle;
pub mod models;
pub mod range;
pub mod store;

pub use cleanup::{cleanup_invalid_entries, find_invalid_entries, CleanupReport};
pub use handle::{ScheduleHandle, DEFAULT_MAILBOX_SIZE};
pub use models::{ScheduleEntry, ScheduleSnapshot, UserSchedule};
pub use range::{apply_range, DateRange};
pub use store::{InMemoryStore, ScheduleStore};
