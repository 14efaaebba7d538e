//! Sensor registry records.
//!
//! Sensors live in the security store; this module only defines their shape
//! and identity.

pub mod sensor;

pub use sensor::{Sensor, SensorId, SensorType};
