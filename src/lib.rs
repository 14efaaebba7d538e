//! Catpoint security library.
//!
//! This library provides the alarm decision engine of a home security system:
//! it tracks the alarm and arming status, reacts to sensor changes and camera
//! cat-detection verdicts, and notifies registered listeners.

pub mod config;
pub mod error;
pub mod input;
pub mod instance_lock;
pub mod sensors;
pub mod service;
pub mod status;
pub mod store;

pub use error::{Result, SecurityError};
pub use input::camera::{CameraImage, ImageClassifier};
pub use sensors::{Sensor, SensorId, SensorType};
pub use service::{SecurityService, StatusListener};
pub use status::{AlarmStatus, ArmingStatus};
pub use store::SecurityRepository;
