use thiserror::Error;

/// Errors raised at the schedule construction/parsing boundary.
///
/// The recurrence engine itself never returns these: a schedule that made
/// it past construction but is still degenerate (empty times, empty
/// weekday set) degrades to an empty occurrence list instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid time of day: {hour:02}:{minute:02}")]
    InvalidTime { hour: u8, minute: u8 },

    #[error("Invalid dosing interval: {hours} hours (expected 1-24)")]
    InvalidInterval { hours: u8 },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Unparseable time of day: {value} (expected HH:MM)")]
    UnparseableTime { value: String },
}
