//! Alarm decision engine and its notification hub.

pub mod logging_listener;
pub mod notifier;
pub mod rules;
pub mod security_service;

pub use logging_listener::LoggingStatusListener;
pub use notifier::{StatusListener, StatusNotifier};
pub use security_service::{CAT_CONFIDENCE_THRESHOLD, SecurityService};
