//! Security state persistence.
//!
//! The engine never owns alarm status, arming status or sensors directly. It
//! reads and replaces them through a [`SecurityRepository`], which may be kept
//! in memory ([`InMemorySecurityRepository`]) or on disk
//! ([`JsonFileSecurityRepository`]).

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSecurityRepository;
pub use memory::InMemorySecurityRepository;

use crate::error::{Result, SecurityError};
use crate::sensors::sensor::display_order;
use crate::sensors::{Sensor, SensorId};
use crate::status::{AlarmStatus, ArmingStatus};
use serde::{Deserialize, Serialize};

/// Store contract used by the security service.
///
/// Every call may fail; implementations report an unreachable or unwritable
/// backend as [`SecurityError::StoreUnavailable`].
pub trait SecurityRepository: Send + Sync {
    fn alarm_status(&self) -> Result<AlarmStatus>;

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()>;

    fn arming_status(&self) -> Result<ArmingStatus>;

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()>;

    /// Snapshot of all registered sensors, ordered by name, type, then id.
    fn sensors(&self) -> Result<Vec<Sensor>>;

    /// Register a sensor. Adding an id that is already registered is a no-op.
    fn add_sensor(&self, sensor: Sensor) -> Result<()>;

    /// Unregister a sensor. Unknown ids are ignored.
    fn remove_sensor(&self, id: SensorId) -> Result<()>;

    /// Persist the current activation flag of a registered sensor.
    fn update_sensor(&self, sensor: &Sensor) -> Result<()>;

    /// Look up the stored copy of one sensor.
    fn sensor(&self, id: SensorId) -> Result<Option<Sensor>> {
        Ok(self.sensors()?.into_iter().find(|s| s.id() == id))
    }
}

/// The complete persisted state of the security system.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SecurityState {
    #[serde(default)]
    pub alarm_status: AlarmStatus,
    #[serde(default)]
    pub arming_status: ArmingStatus,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

impl SecurityState {
    pub fn sorted_sensors(&self) -> Vec<Sensor> {
        let mut sensors = self.sensors.clone();
        sensors.sort_by(display_order);
        sensors
    }

    /// Insert unless a sensor with the same id exists. Returns true if inserted.
    pub fn insert_sensor(&mut self, sensor: Sensor) -> bool {
        if self.sensors.iter().any(|s| s.id() == sensor.id()) {
            return false;
        }
        self.sensors.push(sensor);
        true
    }

    /// Returns true if a sensor was removed.
    pub fn remove_sensor(&mut self, id: SensorId) -> bool {
        let before = self.sensors.len();
        self.sensors.retain(|s| s.id() != id);
        self.sensors.len() != before
    }

    pub fn update_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        let stored = self
            .sensors
            .iter_mut()
            .find(|s| s.id() == sensor.id())
            .ok_or(SecurityError::UnknownSensor(sensor.id()))?;
        *stored = sensor.clone();
        Ok(())
    }
}
