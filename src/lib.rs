//! Doseplan — medication dosing-schedule recurrence engine.
//!
//! Expands a medication's recurring-dose specification (frequency tag,
//! time-of-day list, hour interval, weekday set, or one-time date) into
//! its next *N* future dose instants. The engine is a pure function of
//! `(schedule, now, count)`: `now` is always an explicit parameter, so
//! results are deterministic and testable without mocking clocks.
//!
//! All instants are device-local wall-clock values (`NaiveDateTime`);
//! time zones and DST are intentionally out of scope. Malformed or
//! partially-empty schedules never error — they degrade to an empty
//! occurrence list, bounded by an explicit day-scan limit.

pub mod error;
pub mod frequency;
pub mod recurrence;
pub mod reminders;
pub mod schedule;

pub use error::ScheduleError;
pub use frequency::ScheduleFrequency;
pub use recurrence::{next_doses, upcoming_doses, DEFAULT_UPCOMING_COUNT};
pub use reminders::{
    reminders_for_medication, upcoming_reminders, DoseReminder, MedicationReminders,
};
pub use schedule::{Schedule, TimeOfDay, WeekdaySet};
