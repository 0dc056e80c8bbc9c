// Export components
pub mod schedule;
pub mod shift;

// Re-export the schedule handle
pub use schedule::ScheduleHandle;
