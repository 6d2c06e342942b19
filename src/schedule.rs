//! Schedule descriptor: the value object the medication edit form builds
//! and the recurrence engine consumes.
//!
//! Only the fields relevant to `frequency` are read by the engine; the
//! rest are ignored. Cross-field validation (e.g. "a twice-daily schedule
//! should carry two times") is the form's responsibility, not enforced
//! here.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScheduleError;
use crate::frequency::ScheduleFrequency;

// ═══════════════════════════════════════════
// TimeOfDay
// ═══════════════════════════════════════════

/// A wall-clock dose time, `HH:MM`, no date and no time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Place this time on a calendar day. `None` if the fields are out of
    /// range (possible via deserialisation); the engine skips such slots.
    pub(crate) fn on(&self, day: NaiveDate) -> Option<NaiveDateTime> {
        day.and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || ScheduleError::UnparseableTime { value: s.into() };
        let (hour_str, minute_str) = s.trim().split_once(':').ok_or_else(unparseable)?;
        let hour: u8 = hour_str.parse().map_err(|_| unparseable())?;
        let minute: u8 = minute_str.parse().map_err(|_| unparseable())?;
        Self::new(hour, minute)
    }
}

// ═══════════════════════════════════════════
// WeekdaySet
// ═══════════════════════════════════════════

/// All weekdays, Sunday first (the order the form renders its checkboxes).
const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Set of weekdays, stored as a bitmask over `chrono::Weekday`.
///
/// Serialises as a list of lowercase day tags (`["mon", "thu"]`), the
/// shape the form's weekday checkboxes produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    pub fn from_days(days: &[Weekday]) -> Self {
        days.iter().copied().collect()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the contained days, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> {
        let set = *self;
        ALL_WEEKDAYS.into_iter().filter(move |day| set.contains(*day))
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_sunday()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

fn weekday_tag(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "sun",
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_tag))
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<String>::deserialize(deserializer)?;
        let mut set = Self::EMPTY;
        for tag in &tags {
            let day: Weekday = tag
                .parse()
                .map_err(|_| D::Error::custom(format!("unknown weekday tag: {tag}")))?;
            set.insert(day);
        }
        Ok(set)
    }
}

// ═══════════════════════════════════════════
// Schedule
// ═══════════════════════════════════════════

/// Recurring-dose specification carried on a medication record.
///
/// All instants are naive wall-clock values: the source application runs
/// entirely on device-local calendar time, with no time-zone or DST
/// model, and the engine preserves that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub frequency: ScheduleFrequency,
    /// Dose times for the fixed daily frequencies and `SpecificDaysOfWeek`.
    #[serde(default)]
    pub times_of_day: Vec<TimeOfDay>,
    /// Hours between doses for `EveryXHours`; meaningful range 1-24.
    #[serde(default)]
    pub interval_hours: u8,
    /// Active days for `SpecificDaysOfWeek`.
    #[serde(default)]
    pub days_of_week: WeekdaySet,
    /// The single dose instant for `SpecificDateOnce`.
    #[serde(default)]
    pub specific_date: Option<NaiveDateTime>,
    /// Prescription timestamp; seeds the phase of `EveryXHours`.
    #[serde(default)]
    pub anchor: Option<NaiveDateTime>,
}

impl Schedule {
    fn base(frequency: ScheduleFrequency) -> Self {
        Self {
            frequency,
            times_of_day: Vec::new(),
            interval_hours: 0,
            days_of_week: WeekdaySet::EMPTY,
            specific_date: None,
            anchor: None,
        }
    }

    /// Fixed daily schedule; the frequency tag is derived from how many
    /// times were supplied (1-4). Any other length yields a `Custom`
    /// schedule, which produces no occurrences.
    pub fn daily(times_of_day: Vec<TimeOfDay>) -> Self {
        let frequency = match times_of_day.len() {
            1 => ScheduleFrequency::OnceDaily,
            2 => ScheduleFrequency::TwiceDaily,
            3 => ScheduleFrequency::ThreeTimesDaily,
            4 => ScheduleFrequency::FourTimesDaily,
            _ => ScheduleFrequency::Custom,
        };
        Self {
            times_of_day,
            ..Self::base(frequency)
        }
    }

    pub fn once_daily(at: TimeOfDay) -> Self {
        Self::daily(vec![at])
    }

    /// Interval schedule phased from the prescription timestamp.
    pub fn every_hours(interval_hours: u8, anchor: NaiveDateTime) -> Result<Self, ScheduleError> {
        if !(1..=24).contains(&interval_hours) {
            return Err(ScheduleError::InvalidInterval {
                hours: interval_hours,
            });
        }
        Ok(Self {
            interval_hours,
            anchor: Some(anchor),
            ..Self::base(ScheduleFrequency::EveryXHours)
        })
    }

    pub fn on_days(days_of_week: WeekdaySet, times_of_day: Vec<TimeOfDay>) -> Self {
        Self {
            times_of_day,
            days_of_week,
            ..Self::base(ScheduleFrequency::SpecificDaysOfWeek)
        }
    }

    pub fn once_on(specific_date: NaiveDateTime) -> Self {
        Self {
            specific_date: Some(specific_date),
            ..Self::base(ScheduleFrequency::SpecificDateOnce)
        }
    }

    pub fn as_needed() -> Self {
        Self::base(ScheduleFrequency::AsNeeded)
    }

    pub fn custom() -> Self {
        Self::base(ScheduleFrequency::Custom)
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
