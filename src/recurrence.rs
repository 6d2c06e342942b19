//! Dose occurrence engine: expands a [`Schedule`] into its next future
//! dose instants.
//!
//! Pure computation over an explicit `now` — no ambient clock, no state,
//! no I/O. Callers wanting a live "upcoming doses" view re-invoke on
//! every render. Degenerate schedules never error; they produce an empty
//! list, and the day-scan bound below guarantees that degradation
//! terminates.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, trace};

use crate::frequency::ScheduleFrequency;
use crate::schedule::Schedule;

/// Occurrences returned when the caller doesn't ask for a count.
pub const DEFAULT_UPCOMING_COUNT: usize = 5;

/// Consecutive calendar days the walk may scan without collecting a
/// single occurrence before it gives up. Eight days starting from a
/// partially-elapsed day always covers a full weekday cycle, so any
/// schedule that can produce an occurrence produces one inside the bound.
const EMPTY_DAY_SCAN_LIMIT: u32 = 8;

/// Compute the next `count` future dose instants for a schedule.
///
/// The result is strictly increasing, strictly after `now`, and at most
/// `count` long. Identical inputs always produce identical output.
pub fn upcoming_doses(schedule: &Schedule, now: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
    debug!(
        frequency = schedule.frequency.as_str(),
        count, "computing upcoming doses"
    );
    if count == 0 {
        return Vec::new();
    }

    let mut occurrences = match schedule.frequency {
        // No deterministic recurrence; the UI shows free-text
        // instructions for these.
        ScheduleFrequency::AsNeeded | ScheduleFrequency::Custom => Vec::new(),

        // At most one occurrence, and only while it is still ahead.
        ScheduleFrequency::SpecificDateOnce => schedule
            .specific_date
            .into_iter()
            .filter(|date| *date > now)
            .collect(),

        ScheduleFrequency::EveryXHours => interval_occurrences(schedule, now, count),

        ScheduleFrequency::OnceDaily
        | ScheduleFrequency::TwiceDaily
        | ScheduleFrequency::ThreeTimesDaily
        | ScheduleFrequency::FourTimesDaily
        | ScheduleFrequency::SpecificDaysOfWeek => {
            collect_day_walk(DayWalk::new(schedule, now), count)
        }
    };

    occurrences.sort_unstable();
    occurrences.dedup();
    occurrences.truncate(count);
    occurrences
}

/// [`upcoming_doses`] with the default count.
pub fn next_doses(schedule: &Schedule, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    upcoming_doses(schedule, now, DEFAULT_UPCOMING_COUNT)
}

/// `EveryXHours`: fixed-interval occurrences phased from the anchor.
///
/// The first emitted instant is the earliest step strictly after `now`
/// on the grid `today @ anchor-time + k * interval`; past steps advance
/// the phase but are never emitted.
fn interval_occurrences(
    schedule: &Schedule,
    now: NaiveDateTime,
    count: usize,
) -> Vec<NaiveDateTime> {
    let Some(anchor) = schedule.anchor else {
        trace!("interval schedule without anchor; no occurrences");
        return Vec::new();
    };
    if !(1..=24).contains(&schedule.interval_hours) {
        trace!(
            interval_hours = schedule.interval_hours,
            "interval out of range; no occurrences"
        );
        return Vec::new();
    }

    // Re-anchor to today's date, keeping the prescription's wall-clock
    // phase; seconds and sub-seconds are zeroed.
    let Some(phase) = NaiveTime::from_hms_opt(anchor.time().hour(), anchor.time().minute(), 0)
    else {
        return Vec::new();
    };
    let step = Duration::hours(i64::from(schedule.interval_hours));
    let mut first = now.date().and_time(phase);
    while first <= now {
        first += step;
    }

    (0..count).map(|i| first + step * i as i32).collect()
}

/// Drain the day walk into a result list, with timestamp-exact dedup and
/// the count cut-off.
fn collect_day_walk(walk: DayWalk<'_>, count: usize) -> Vec<NaiveDateTime> {
    let mut occurrences: Vec<NaiveDateTime> = Vec::with_capacity(count);
    for candidate in walk {
        if !occurrences.contains(&candidate) {
            occurrences.push(candidate);
        }
        if occurrences.len() >= count {
            break;
        }
    }
    occurrences
}

/// Lazy day-by-day walk over a time-of-day schedule.
///
/// Yields candidate instants strictly after `now`, visiting each calendar
/// day's `times_of_day` in list order and skipping days whose weekday is
/// filtered out by a `SpecificDaysOfWeek` schedule. Finite by
/// construction: if no candidate has been yielded after
/// [`EMPTY_DAY_SCAN_LIMIT`] days, the schedule is degenerate and the walk
/// ends.
struct DayWalk<'a> {
    schedule: &'a Schedule,
    now: NaiveDateTime,
    day: NaiveDate,
    time_idx: usize,
    days_scanned: u32,
    yielded_any: bool,
}

impl<'a> DayWalk<'a> {
    fn new(schedule: &'a Schedule, now: NaiveDateTime) -> Self {
        Self {
            schedule,
            now,
            day: now.date(),
            time_idx: 0,
            days_scanned: 0,
            yielded_any: false,
        }
    }

    fn day_is_active(&self) -> bool {
        self.schedule.frequency != ScheduleFrequency::SpecificDaysOfWeek
            || self.schedule.days_of_week.contains(self.day.weekday())
    }
}

impl Iterator for DayWalk<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        loop {
            if self.time_idx >= self.schedule.times_of_day.len() {
                // Day exhausted (or the schedule has no times at all).
                self.day = self.day.succ_opt()?;
                self.time_idx = 0;
                self.days_scanned += 1;
                if !self.yielded_any && self.days_scanned >= EMPTY_DAY_SCAN_LIMIT {
                    trace!(
                        days_scanned = self.days_scanned,
                        "degenerate schedule; day walk exhausted without occurrences"
                    );
                    return None;
                }
                continue;
            }

            if !self.day_is_active() {
                self.time_idx = self.schedule.times_of_day.len();
                continue;
            }

            let slot = self.schedule.times_of_day[self.time_idx];
            self.time_idx += 1;
            if let Some(candidate) = slot.on(self.day) {
                if candidate > self.now {
                    self.yielded_any = true;
                    return Some(candidate);
                }
            }
        }
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
