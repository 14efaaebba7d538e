//! Alarm status transition rules.
//!
//! Pure functions over the current status values. `None` means "leave the
//! alarm status alone" and is spelled out for every such case so each match
//! stays exhaustive.

use crate::status::{AlarmStatus, ArmingStatus};

/// Alarm status after a sensor reports (or re-reports) activity.
pub fn on_sensor_activated(alarm: AlarmStatus, arming: ArmingStatus) -> Option<AlarmStatus> {
    if !arming.is_armed() {
        return None;
    }
    match alarm {
        AlarmStatus::NoAlarm => Some(AlarmStatus::PendingAlarm),
        AlarmStatus::PendingAlarm => Some(AlarmStatus::Alarm),
        AlarmStatus::Alarm => None,
    }
}

/// Alarm status after an active sensor goes quiet.
pub fn on_sensor_deactivated(alarm: AlarmStatus) -> Option<AlarmStatus> {
    match alarm {
        AlarmStatus::NoAlarm => None,
        AlarmStatus::PendingAlarm => Some(AlarmStatus::NoAlarm),
        AlarmStatus::Alarm => Some(AlarmStatus::PendingAlarm),
    }
}

/// Alarm status after a camera verdict. Always yields a status.
///
/// A cat seen while armed-home escalates straight to `Alarm`. Anything else
/// falls back to the sensors: any active sensor means `Alarm`, all quiet means
/// `NoAlarm`.
pub fn on_cat_verdict(cat: bool, arming: ArmingStatus, any_sensor_active: bool) -> AlarmStatus {
    match (cat, arming) {
        (true, ArmingStatus::ArmedHome) => AlarmStatus::Alarm,
        (true, ArmingStatus::ArmedAway | ArmingStatus::Disarmed) | (false, _) => {
            if any_sensor_active {
                AlarmStatus::Alarm
            } else {
                AlarmStatus::NoAlarm
            }
        }
    }
}
