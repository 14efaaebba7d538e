use crate::instance_lock::InstanceLockError;
use crate::sensors::SensorId;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SecurityError {
    #[error("Sensor is not registered: {0}")]
    UnknownSensor(SensorId),

    #[error("No sensor matches '{0}'")]
    SensorNotFound(String),

    #[error("Sensor name '{0}' matches more than one sensor, use its id")]
    AmbiguousSensorName(String),

    #[error("Confidence threshold {0} is outside [0, 100]")]
    InvalidConfidenceThreshold(f32),

    #[error("Image classification failed: {0}")]
    ClassifierFailed(String),

    #[error("Security store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    InstanceLock(#[from] InstanceLockError),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SecurityError>;
