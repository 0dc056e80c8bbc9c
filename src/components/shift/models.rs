use crate::error::Error;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shift rotation pattern a user declares during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    #[serde(rename = "2shift")]
    TwoShift,
    #[serde(rename = "3shift")]
    ThreeShift,
    #[serde(rename = "fixed_night")]
    FixedNight,
    #[serde(rename = "irregular")]
    Irregular,
}

impl WorkType {
    /// Every work type, in onboarding order
    pub const ALL: [WorkType; 4] = [
        WorkType::TwoShift,
        WorkType::ThreeShift,
        WorkType::FixedNight,
        WorkType::Irregular,
    ];

    /// Stored representation ("2shift", "fixed_night", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            WorkType::TwoShift => "2shift",
            WorkType::ThreeShift => "3shift",
            WorkType::FixedNight => "fixed_night",
            WorkType::Irregular => "irregular",
        }
    }

    /// Parse a work type read from storage or user input.
    ///
    /// Unrecognised values resolve to [`WorkType::Irregular`], which allows
    /// every shift type. Callers cannot tell an unknown value apart from a
    /// real `irregular` one.
    pub fn from_str_lenient(value: &str) -> Self {
        value.parse().unwrap_or(WorkType::Irregular)
    }

    /// Display label in the current locale
    pub fn label(self) -> String {
        self.label_in(&rust_i18n::locale())
    }

    pub fn label_in(self, locale: &str) -> String {
        match self {
            WorkType::TwoShift => t!("work_type_label_2shift", locale = locale),
            WorkType::ThreeShift => t!("work_type_label_3shift", locale = locale),
            WorkType::FixedNight => t!("work_type_label_fixed_night", locale = locale),
            WorkType::Irregular => t!("work_type_label_irregular", locale = locale),
        }
        .to_string()
    }
}

impl Default for WorkType {
    fn default() -> Self {
        WorkType::Irregular
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2shift" => Ok(WorkType::TwoShift),
            "3shift" => Ok(WorkType::ThreeShift),
            "fixed_night" => Ok(WorkType::FixedNight),
            "irregular" => Ok(WorkType::Irregular),
            other => Err(Error::UnknownWorkType(other.to_string())),
        }
    }
}

/// Category of a single day's assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Day,
    Evening,
    Night,
    Off,
}

impl ShiftType {
    /// Every shift type in canonical order
    pub const ALL: [ShiftType; 4] = [
        ShiftType::Day,
        ShiftType::Evening,
        ShiftType::Night,
        ShiftType::Off,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Evening => "evening",
            ShiftType::Night => "night",
            ShiftType::Off => "off",
        }
    }

    /// Short label ("Day", "주간") in the current locale
    pub fn label(self) -> String {
        self.label_in(&rust_i18n::locale())
    }

    pub fn label_in(self, locale: &str) -> String {
        match self {
            ShiftType::Day => t!("shift_label_day", locale = locale),
            ShiftType::Evening => t!("shift_label_evening", locale = locale),
            ShiftType::Night => t!("shift_label_night", locale = locale),
            ShiftType::Off => t!("shift_label_off", locale = locale),
        }
        .to_string()
    }

    /// Long label ("Day shift", "주간 근무") in the current locale
    pub fn full_label(self) -> String {
        self.full_label_in(&rust_i18n::locale())
    }

    pub fn full_label_in(self, locale: &str) -> String {
        match self {
            ShiftType::Day => t!("shift_full_label_day", locale = locale),
            ShiftType::Evening => t!("shift_full_label_evening", locale = locale),
            ShiftType::Night => t!("shift_full_label_night", locale = locale),
            ShiftType::Off => t!("shift_full_label_off", locale = locale),
        }
        .to_string()
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(ShiftType::Day),
            "evening" => Ok(ShiftType::Evening),
            "night" => Ok(ShiftType::Night),
            "off" => Ok(ShiftType::Off),
            other => Err(Error::UnknownShiftType(other.to_string())),
        }
    }
}
