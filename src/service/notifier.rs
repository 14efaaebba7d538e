//! Status change fan-out.
//!
//! Observers (display panels, loggers, test probes) implement
//! [`StatusListener`] and register with the security service. The service
//! pushes every change through a [`StatusNotifier`], which calls each
//! registered listener synchronously.

use crate::status::{AlarmStatus, ArmingStatus};
use parking_lot::RwLock;
use std::sync::Arc;

/// A component that is told whenever the system status changes.
///
/// Callbacks run on the caller's thread while the service is mid-operation;
/// they must not call back into the security service.
pub trait StatusListener: Send + Sync {
    fn alarm_status_changed(&self, status: AlarmStatus);

    fn cat_detected(&self, detected: bool);

    /// Some sensor's activation flag was written.
    fn sensor_status_changed(&self);

    fn arming_status_changed(&self, status: ArmingStatus);
}

/// Set of registered listeners, keyed by `Arc` identity.
///
/// Registering the same `Arc` twice keeps one entry, and removing a
/// listener that was never registered does nothing. Dispatch runs in
/// registration order over a snapshot, so a callback may register or
/// remove listeners without deadlocking.
#[derive(Default)]
pub struct StatusNotifier {
    listeners: RwLock<Vec<Arc<dyn StatusListener>>>,
}

impl StatusNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the listener was not registered before.
    pub fn add(&self, listener: Arc<dyn StatusListener>) -> bool {
        let mut listeners = self.listeners.write();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Returns true if the listener was registered.
    pub fn remove(&self, listener: &Arc<dyn StatusListener>) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    pub fn alarm_status_changed(&self, status: AlarmStatus) {
        self.each(|l| l.alarm_status_changed(status));
    }

    pub fn cat_detected(&self, detected: bool) {
        self.each(|l| l.cat_detected(detected));
    }

    pub fn sensor_status_changed(&self) {
        self.each(|l| l.sensor_status_changed());
    }

    pub fn arming_status_changed(&self, status: ArmingStatus) {
        self.each(|l| l.arming_status_changed(status));
    }

    fn each(&self, f: impl Fn(&dyn StatusListener)) {
        let snapshot = self.listeners.read().clone();
        for listener in &snapshot {
            f(listener.as_ref());
        }
    }
}

// Compare data pointers only; vtable pointers for the same type may differ
// between codegen units.
fn same_listener(a: &Arc<dyn StatusListener>, b: &Arc<dyn StatusListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
