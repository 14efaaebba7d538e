//! Listener that writes every status notification to the log.

use super::notifier::StatusListener;
use crate::status::{AlarmStatus, ArmingStatus};
use log::{info, warn};

/// Logs each notification. Alarm escalations are logged at `warn`.
#[derive(Default)]
pub struct LoggingStatusListener;

impl StatusListener for LoggingStatusListener {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("[Status] ALARM: {}", status.description()),
            AlarmStatus::PendingAlarm | AlarmStatus::NoAlarm => {
                info!("[Status] alarm status {}: {}", status, status.description())
            }
        }
    }

    fn cat_detected(&self, detected: bool) {
        if detected {
            info!("[Status] DANGER - CAT DETECTED");
        } else {
            info!("[Status] camera clear");
        }
    }

    fn sensor_status_changed(&self) {
        info!("[Status] sensor states changed");
    }

    fn arming_status_changed(&self, status: ArmingStatus) {
        info!("[Status] system {}", status.description());
    }
}
