//! Sensor and camera simulation.
//!
//! Each tick optionally flips one random sensor and then feeds a synthetic
//! camera frame through the security service, which is roughly what a quiet
//! house with a restless cat looks like.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::input::camera::CameraImage;
use crate::service::SecurityService;
use log::{info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

/// Size of the noise frames handed to the classifier.
pub const SYNTHETIC_FRAME_BYTES: usize = 64 * 48;

/// Run one simulation step against the service.
pub fn simulate_tick(
    service: &SecurityService,
    rng: &mut impl Rng,
    toggle_sensors: bool,
) -> Result<()> {
    if toggle_sensors {
        let sensors = service.sensors()?;
        if let Some(sensor) = sensors.choose(rng) {
            let updated =
                service.change_sensor_activation_status(sensor.id(), !sensor.is_active())?;
            info!(
                "[Sim] {} toggled to: {}",
                updated.name(),
                updated.is_active()
            );
        }
    }

    let frame = CameraImage::synthetic(rng, SYNTHETIC_FRAME_BYTES);
    service.process_image(&frame)?;
    Ok(())
}

/// Spawn a task that runs [`simulate_tick`] every `interval_secs` seconds.
///
/// Errors are logged and the loop keeps going. Abort the returned handle to
/// stop it.
pub fn run_simulation(
    service: Arc<SecurityService>,
    config: SimulationConfig,
    seed: Option<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let rng = Arc::new(Mutex::new(match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }));
        let mut interval = interval(Duration::from_secs(config.interval_secs.max(1)));
        loop {
            interval.tick().await;
            // Store writes block, so the tick runs off the async workers.
            let service = service.clone();
            let rng = rng.clone();
            let toggle_sensors = config.toggle_sensors;
            let tick = tokio::task::spawn_blocking(move || {
                simulate_tick(&service, &mut *rng.lock(), toggle_sensors)
            })
            .await;
            match tick {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("[Sim] tick failed: {}", e),
                Err(e) => warn!("[Sim] tick task panicked: {}", e),
            }
        }
    })
}
