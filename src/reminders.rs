//! Upcoming-dose view types for the reminders dialog.
//!
//! Rendering only: each occurrence becomes a `formatted-date
//! (weekday-name)` line next to its raw instant. Delivery and
//! notification scheduling live elsewhere entirely.

use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::recurrence::{upcoming_doses, DEFAULT_UPCOMING_COUNT};
use crate::schedule::Schedule;

/// One rendered upcoming dose, e.g. `2026-03-05 09:00 (Thursday)`.
#[derive(Debug, Clone, Serialize)]
pub struct DoseReminder {
    pub at: NaiveDateTime,
    pub display: String,
}

impl DoseReminder {
    fn render(at: NaiveDateTime) -> Self {
        Self {
            at,
            display: at.format("%Y-%m-%d %H:%M (%A)").to_string(),
        }
    }
}

/// Reminder list for one medication, serialised to the frontend dialog.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationReminders {
    pub medication_id: Uuid,
    pub medication_name: String,
    pub doses: Vec<DoseReminder>,
}

/// Render the next `count` doses of a schedule.
pub fn upcoming_reminders(
    schedule: &Schedule,
    now: NaiveDateTime,
    count: usize,
) -> Vec<DoseReminder> {
    upcoming_doses(schedule, now, count)
        .into_iter()
        .map(DoseReminder::render)
        .collect()
}

/// Assemble the reminders dialog payload for a medication. An empty
/// `doses` list renders as "no upcoming doses" on the frontend.
pub fn reminders_for_medication(
    medication_id: Uuid,
    medication_name: &str,
    schedule: &Schedule,
    now: NaiveDateTime,
) -> MedicationReminders {
    MedicationReminders {
        medication_id,
        medication_name: medication_name.to_string(),
        doses: upcoming_reminders(schedule, now, DEFAULT_UPCOMING_COUNT),
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{TimeOfDay, WeekdaySet};
    use chrono::{NaiveDate, Weekday};

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn display_includes_date_time_and_weekday_name() {
        // Mon + Thu at 09:00, asked Tuesday: first reminder is Thursday.
        let schedule = Schedule::on_days(
            WeekdaySet::from_days(&[Weekday::Mon, Weekday::Thu]),
            vec![TimeOfDay::new(9, 0).unwrap()],
        );
        let reminders = upcoming_reminders(&schedule, dt(3, 8, 0), 2);
        assert_eq!(reminders[0].display, "2026-03-05 09:00 (Thursday)");
        assert_eq!(reminders[1].display, "2026-03-09 09:00 (Monday)");
    }

    #[test]
    fn reminders_follow_engine_order() {
        let schedule = Schedule::daily(vec![
            TimeOfDay::new(8, 0).unwrap(),
            TimeOfDay::new(20, 0).unwrap(),
        ]);
        let reminders = upcoming_reminders(&schedule, dt(2, 10, 0), 3);
        let instants: Vec<NaiveDateTime> = reminders.iter().map(|r| r.at).collect();
        assert_eq!(instants, vec![dt(2, 20, 0), dt(3, 8, 0), dt(3, 20, 0)]);
    }

    #[test]
    fn medication_payload_carries_identity() {
        let id = Uuid::new_v4();
        let schedule = Schedule::once_daily(TimeOfDay::new(8, 0).unwrap());
        let payload = reminders_for_medication(id, "Metformin", &schedule, dt(2, 10, 0));
        assert_eq!(payload.medication_id, id);
        assert_eq!(payload.medication_name, "Metformin");
        assert_eq!(payload.doses.len(), DEFAULT_UPCOMING_COUNT);
    }

    #[test]
    fn as_needed_payload_has_no_doses() {
        let payload = reminders_for_medication(
            Uuid::new_v4(),
            "Ibuprofen",
            &Schedule::as_needed(),
            dt(2, 10, 0),
        );
        assert!(payload.doses.is_empty());
    }

    #[test]
    fn payload_serialises_for_frontend() {
        let schedule = Schedule::once_daily(TimeOfDay::new(8, 0).unwrap());
        let payload =
            reminders_for_medication(Uuid::new_v4(), "Metformin", &schedule, dt(2, 10, 0));
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"medication_name\":\"Metformin\""));
        assert!(json.contains("\"display\":\"2026-03-03 08:00 (Tuesday)\""));
    }
}
