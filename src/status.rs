//! Alarm and arming status values.
//!
//! Both enums are closed: every value the engine can observe is one of the
//! variants below. They serialize as `SCREAMING_SNAKE_CASE` in the state file
//! and parse from either that form or kebab-case on the command line.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Severity of the current security condition.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AlarmStatus {
    #[default]
    #[strum(to_string = "no-alarm", serialize = "no_alarm")]
    NoAlarm,
    #[strum(to_string = "pending-alarm", serialize = "pending_alarm")]
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// Short human-readable text shown by presentation layers.
    pub fn description(self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "Cool and Good",
            AlarmStatus::PendingAlarm => "I'm in Danger...",
            AlarmStatus::Alarm => "Awooga!",
        }
    }
}

/// Whether the system is watching its sensors, and in which mode.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    #[strum(to_string = "armed-home", serialize = "armed_home")]
    ArmedHome,
    #[strum(to_string = "armed-away", serialize = "armed_away")]
    ArmedAway,
}

impl ArmingStatus {
    pub fn description(self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "Disarmed",
            ArmingStatus::ArmedHome => "Armed - At Home",
            ArmingStatus::ArmedAway => "Armed - Away",
        }
    }

    /// True for both armed modes.
    pub fn is_armed(self) -> bool {
        match self {
            ArmingStatus::Disarmed => false,
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => true,
        }
    }
}
