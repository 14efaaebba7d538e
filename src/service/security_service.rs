//! The alarm decision engine.
//!
//! [`SecurityService`] receives arming commands, sensor changes and camera
//! frames, decides how the alarm status moves, writes the result to the
//! security store and tells every registered [`StatusListener`].

use super::notifier::{StatusListener, StatusNotifier};
use super::rules;
use crate::error::{Result, SecurityError};
use crate::input::camera::{CameraImage, ImageClassifier};
use crate::sensors::{Sensor, SensorId};
use crate::status::{AlarmStatus, ArmingStatus};
use crate::store::SecurityRepository;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

/// Minimum classifier confidence (percent) for a frame to count as a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Alarm state machine over a security store and an image classifier.
///
/// Every operation re-reads the store, so several services (or processes)
/// sharing one store always decide on current data. Within one service,
/// public operations are serialized by an internal lock; listener callbacks
/// run while it is held.
pub struct SecurityService {
    repository: Arc<dyn SecurityRepository>,
    classifier: Arc<dyn ImageClassifier>,
    notifier: StatusNotifier,
    operation: Mutex<()>,
}

impl SecurityService {
    pub fn new(
        repository: Arc<dyn SecurityRepository>,
        classifier: Arc<dyn ImageClassifier>,
    ) -> Self {
        Self {
            repository,
            classifier,
            notifier: StatusNotifier::new(),
            operation: Mutex::new(()),
        }
    }

    /// Register a listener for status updates. Adding the same `Arc` twice
    /// keeps a single registration.
    pub fn add_status_listener(&self, listener: Arc<dyn StatusListener>) {
        self.notifier.add(listener);
    }

    pub fn remove_status_listener(&self, listener: &Arc<dyn StatusListener>) {
        self.notifier.remove(listener);
    }

    /// Change the arming status.
    ///
    /// Disarming clears any alarm. Arming (home or away) resets every sensor
    /// to inactive before the new arming status is stored.
    pub fn set_arming_status(&self, arming: ArmingStatus) -> Result<()> {
        let _op = self.operation.lock();
        match arming {
            ArmingStatus::Disarmed => self.apply_alarm_status(AlarmStatus::NoAlarm)?,
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => self.reset_sensors()?,
        }
        self.repository.set_arming_status(arming)?;
        info!("[Arming] {} ({})", arming, arming.description());
        self.notifier.arming_status_changed(arming);
        Ok(())
    }

    /// Set a sensor's activation flag and update the alarm status.
    ///
    /// The decision uses the stored flag from before the change. While the
    /// system is in full alarm, sensor changes never move the alarm status.
    /// Re-activating an already active sensor escalates like a fresh
    /// activation. Returns the sensor as stored afterwards.
    pub fn change_sensor_activation_status(&self, id: SensorId, active: bool) -> Result<Sensor> {
        let _op = self.operation.lock();
        let mut sensor = self
            .repository
            .sensor(id)?
            .ok_or(SecurityError::UnknownSensor(id))?;

        let alarm = self.repository.alarm_status()?;
        let next = match alarm {
            AlarmStatus::Alarm => None,
            _ if active => rules::on_sensor_activated(alarm, self.repository.arming_status()?),
            _ if sensor.is_active() => rules::on_sensor_deactivated(alarm),
            _ => None,
        };
        match next {
            Some(status) => self.apply_alarm_status(status)?,
            None => debug!(
                "[Sensor] {} -> {}: alarm status stays {}",
                sensor.name(),
                active,
                alarm
            ),
        }

        sensor.set_active(active);
        self.repository.update_sensor(&sensor)?;
        info!(
            "[Sensor] {} ({}) is now {}",
            sensor.name(),
            sensor.sensor_type(),
            if active { "active" } else { "inactive" }
        );
        self.notifier.sensor_status_changed();
        Ok(sensor)
    }

    /// Classify a camera frame and apply the cat-detection rule.
    ///
    /// Returns the classifier's verdict. A classifier error fails the call
    /// before anything is written.
    pub fn process_image(&self, image: &CameraImage) -> Result<bool> {
        let _op = self.operation.lock();
        let cat = self
            .classifier
            .image_contains_cat(image, CAT_CONFIDENCE_THRESHOLD)?;
        let arming = self.repository.arming_status()?;
        let any_sensor_active = self.repository.sensors()?.iter().any(Sensor::is_active);

        info!(
            "[Camera] {} @ {}: {}",
            image.label(),
            image.captured_at().format("%H:%M:%S%.3f"),
            if cat { "cat detected" } else { "no cat" }
        );
        self.apply_alarm_status(rules::on_cat_verdict(cat, arming, any_sensor_active))?;
        self.notifier.cat_detected(cat);
        Ok(cat)
    }

    /// Store a new alarm status and notify all listeners.
    pub fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        let _op = self.operation.lock();
        self.apply_alarm_status(status)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.repository.alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.repository.arming_status()
    }

    /// Snapshot of the registered sensors.
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.repository.sensors()
    }

    /// Resolve a sensor by id, or by name when exactly one sensor has it.
    pub fn find_sensor(&self, key: &str) -> Result<Sensor> {
        let sensors = self.repository.sensors()?;
        if let Ok(id) = key.parse::<SensorId>() {
            return sensors
                .into_iter()
                .find(|s| s.id() == id)
                .ok_or_else(|| SecurityError::SensorNotFound(key.to_string()));
        }
        let mut named = sensors.into_iter().filter(|s| s.name() == key);
        match (named.next(), named.next()) {
            (Some(sensor), None) => Ok(sensor),
            (Some(_), Some(_)) => Err(SecurityError::AmbiguousSensorName(key.to_string())),
            (None, _) => Err(SecurityError::SensorNotFound(key.to_string())),
        }
    }

    pub fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        let _op = self.operation.lock();
        info!("[Sensor] added {} ({})", sensor.name(), sensor.sensor_type());
        self.repository.add_sensor(sensor)
    }

    pub fn remove_sensor(&self, id: SensorId) -> Result<()> {
        let _op = self.operation.lock();
        self.repository.remove_sensor(id)
    }

    pub fn remove_all_sensors(&self, ids: impl IntoIterator<Item = SensorId>) -> Result<()> {
        let _op = self.operation.lock();
        for id in ids {
            self.repository.remove_sensor(id)?;
        }
        Ok(())
    }

    // Every alarm status write goes through here.
    fn apply_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.repository.set_alarm_status(status)?;
        info!("[Alarm] {} ({})", status, status.description());
        self.notifier.alarm_status_changed(status);
        Ok(())
    }

    fn reset_sensors(&self) -> Result<()> {
        for mut sensor in self.repository.sensors()? {
            sensor.set_active(false);
            self.repository.update_sensor(&sensor)?;
        }
        Ok(())
    }
}
