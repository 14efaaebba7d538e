//! Process-local security store.

use super::{SecurityRepository, SecurityState};
use crate::error::Result;
use crate::sensors::{Sensor, SensorId};
use crate::status::{AlarmStatus, ArmingStatus};
use parking_lot::RwLock;

/// Security store kept entirely in memory. Never fails.
#[derive(Default)]
pub struct InMemorySecurityRepository {
    state: RwLock<SecurityState>,
}

impl InMemorySecurityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state, e.g. a fixture in tests.
    pub fn with_state(state: SecurityState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

impl SecurityRepository for InMemorySecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.state.read().alarm_status)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.state.write().alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.state.read().arming_status)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.state.write().arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.state.read().sorted_sensors())
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        self.state.write().insert_sensor(sensor);
        Ok(())
    }

    fn remove_sensor(&self, id: SensorId) -> Result<()> {
        self.state.write().remove_sensor(id);
        Ok(())
    }

    fn update_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.state.write().update_sensor(sensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorType;

    #[test]
    fn test_fresh_store_defaults() {
        let repo = InMemorySecurityRepository::new();
        assert_eq!(repo.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(repo.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert!(repo.sensors().unwrap().is_empty());
    }

    #[test]
    fn test_update_sensor_persists_flag() {
        let repo = InMemorySecurityRepository::new();
        let mut sensor = Sensor::new("Back Door", SensorType::Door);
        repo.add_sensor(sensor.clone()).unwrap();

        sensor.set_active(true);
        repo.update_sensor(&sensor).unwrap();

        let stored = repo.sensor(sensor.id()).unwrap().unwrap();
        assert!(stored.is_active());
    }

    #[test]
    fn test_sensor_snapshot_is_detached() {
        let repo = InMemorySecurityRepository::new();
        repo.add_sensor(Sensor::new("Porch", SensorType::Motion))
            .unwrap();

        let mut snapshot = repo.sensors().unwrap();
        snapshot[0].set_active(true);

        assert!(!repo.sensors().unwrap()[0].is_active());
    }
}
