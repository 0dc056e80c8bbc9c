//! Which shift types are legal for which work types.
//!
//! The mapping is a fixed table; nothing in here can fail. Unknown work
//! types are treated as `irregular`.

mod compat;
pub mod models;

pub use compat::{get_allowed_shift_types, is_valid_shift_type};
pub use models::{ShiftType, WorkType};
