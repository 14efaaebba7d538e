//! JSON file persistence for the security state.
//!
//! The whole [`SecurityState`] is kept in memory and written back to a single
//! pretty-printed JSON document after every mutation, so a restarted process
//! resumes with the same alarm status, arming status and sensors.
//!
//! ## File layout
//!
//! ```json
//! {
//!   "alarm_status": "NO_ALARM",
//!   "arming_status": "ARMED_HOME",
//!   "sensors": [
//!     { "id": "…", "name": "Front Door", "sensor_type": "DOOR", "active": false }
//!   ]
//! }
//! ```

use super::{SecurityRepository, SecurityState};
use crate::error::{Result, SecurityError};
use crate::sensors::{Sensor, SensorId};
use crate::status::{AlarmStatus, ArmingStatus};
use log::{debug, info};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};

impl SecurityState {
    /// Load from file. A missing file is a first run and yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                let state = serde_json::from_slice::<SecurityState>(&bytes).map_err(|e| {
                    SecurityError::StoreUnavailable(format!(
                        "failed to parse {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                info!(
                    "Loaded security state from {:?} ({}, {}, {} sensors)",
                    path,
                    state.alarm_status,
                    state.arming_status,
                    state.sensors.len()
                );
                Ok(state)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No security state found at {:?} (first run)", path);
                Ok(Self::default())
            }
            Err(e) => Err(SecurityError::StoreUnavailable(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let data = serde_json::to_vec_pretty(self)?;
            fs::write(path, data)
        };
        write().map_err(|e| {
            SecurityError::StoreUnavailable(format!("failed to write {}: {}", path.display(), e))
        })?;
        debug!("Saved security state to {:?}", path);
        Ok(())
    }
}

/// Security store backed by a JSON file, with auto-save.
///
/// Mutations are applied to a copy of the state, written to disk, and only
/// then committed in memory. A failed write leaves both sides unchanged.
pub struct JsonFileSecurityRepository {
    path: PathBuf,
    state: RwLock<SecurityState>,
}

impl JsonFileSecurityRepository {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = SecurityState::load(&path)?;
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut SecurityState) -> Result<T>) -> Result<T> {
        let mut state = self.state.write();
        let mut next = state.clone();
        let out = f(&mut next)?;
        next.save(&self.path)?;
        *state = next;
        Ok(out)
    }
}

impl SecurityRepository for JsonFileSecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.state.read().alarm_status)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.mutate(|state| {
            state.alarm_status = status;
            Ok(())
        })
    }

    fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.state.read().arming_status)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.mutate(|state| {
            state.arming_status = status;
            Ok(())
        })
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.state.read().sorted_sensors())
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<()> {
        if self.state.read().sensors.iter().any(|s| s.id() == sensor.id()) {
            return Ok(());
        }
        self.mutate(|state| {
            state.insert_sensor(sensor);
            Ok(())
        })
    }

    fn remove_sensor(&self, id: SensorId) -> Result<()> {
        if !self.state.read().sensors.iter().any(|s| s.id() == id) {
            return Ok(());
        }
        self.mutate(|state| {
            state.remove_sensor(id);
            Ok(())
        })
    }

    fn update_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.mutate(|state| state.update_sensor(sensor))
    }
}
