//! Schedule frequency enumeration and free-text label recognition.
//!
//! Medication records store frequency two ways: the structured
//! `ScheduleFrequency` tag set by the edit form, and the free-text label
//! printed on the prescription ("twice daily", "every 6 hours").
//! `from_label` maps the recognised phrasings onto the structured tag so
//! imported records get a computable schedule where possible.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Closed enumeration of recurrence kinds.
///
/// `AsNeeded` and `Custom` have no deterministic recurrence; the engine
/// returns no occurrences for them and the UI shows free-text
/// instructions instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleFrequency {
    OnceDaily,
    TwiceDaily,
    ThreeTimesDaily,
    FourTimesDaily,
    EveryXHours,
    SpecificDaysOfWeek,
    SpecificDateOnce,
    AsNeeded,
    Custom,
}

impl ScheduleFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnceDaily => "once_daily",
            Self::TwiceDaily => "twice_daily",
            Self::ThreeTimesDaily => "three_times_daily",
            Self::FourTimesDaily => "four_times_daily",
            Self::EveryXHours => "every_x_hours",
            Self::SpecificDaysOfWeek => "specific_days_of_week",
            Self::SpecificDateOnce => "specific_date_once",
            Self::AsNeeded => "as_needed",
            Self::Custom => "custom",
        }
    }

    /// Doses required per day for the fixed daily frequencies.
    /// Returns `None` for everything else.
    pub fn doses_per_day(&self) -> Option<u32> {
        match self {
            Self::OnceDaily => Some(1),
            Self::TwiceDaily => Some(2),
            Self::ThreeTimesDaily => Some(3),
            Self::FourTimesDaily => Some(4),
            _ => None,
        }
    }

    /// True when the engine reads `times_of_day` for this frequency.
    pub fn uses_times_of_day(&self) -> bool {
        matches!(
            self,
            Self::OnceDaily
                | Self::TwiceDaily
                | Self::ThreeTimesDaily
                | Self::FourTimesDaily
                | Self::SpecificDaysOfWeek
        )
    }

    /// Recognise a free-text frequency label.
    ///
    /// Returns the structured tag plus, for the "every N hours" family,
    /// the hour interval extracted from the text. Unrecognised phrasings
    /// map to `Custom` with no interval, mirroring the engine's
    /// silent-degradation policy.
    pub fn from_label(label: &str) -> (Self, Option<u8>) {
        let normalized = label.trim().to_lowercase();

        if let Some(hours) = parse_interval_phrase(&normalized) {
            return (Self::EveryXHours, Some(hours));
        }

        let frequency = match normalized.as_str() {
            "once daily" | "once a day" | "daily" | "every day" | "qd" => Self::OnceDaily,
            "twice daily" | "twice a day" | "2x daily" | "bid" => Self::TwiceDaily,
            "three times daily" | "three times a day" | "3x daily" | "tid" => {
                Self::ThreeTimesDaily
            }
            "four times daily" | "four times a day" | "4x daily" | "qid" => {
                Self::FourTimesDaily
            }
            "as needed" | "as required" | "prn" => Self::AsNeeded,
            _ => Self::Custom,
        };
        (frequency, None)
    }
}

/// Extract the interval from phrasings like "every 6 hours" / "every 8 hrs".
fn parse_interval_phrase(normalized: &str) -> Option<u8> {
    let re = Regex::new(r"^every\s+(\d{1,2})\s*h(?:ou)?rs?$").ok()?;
    let caps = re.captures(normalized)?;
    caps[1].parse().ok()
}

impl FromStr for ScheduleFrequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once_daily" => Ok(Self::OnceDaily),
            "twice_daily" => Ok(Self::TwiceDaily),
            "three_times_daily" => Ok(Self::ThreeTimesDaily),
            "four_times_daily" => Ok(Self::FourTimesDaily),
            "every_x_hours" => Ok(Self::EveryXHours),
            "specific_days_of_week" => Ok(Self::SpecificDaysOfWeek),
            "specific_date_once" => Ok(Self::SpecificDateOnce),
            "as_needed" => Ok(Self::AsNeeded),
            "custom" => Ok(Self::Custom),
            _ => Err(ScheduleError::InvalidEnum {
                field: "schedule_frequency".into(),
                value: s.into(),
            }),
        }
    }
}

impl fmt::Display for ScheduleFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
