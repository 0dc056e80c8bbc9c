#[macro_use]
extern crate rust_i18n;

pub mod components;
pub mod config;
pub mod error;
pub mod startup;
pub mod utils;

pub use components::schedule::{apply_range, DateRange, ScheduleEntry};
pub use components::shift::{get_allowed_shift_types, is_valid_shift_type, ShiftType, WorkType};
pub use utils::time::format_time_to_hhmm;

// Initialize i18n
i18n!("locales", fallback = "en");
