//! Simulated activity for demos and manual testing.

mod activity;

pub use activity::{SYNTHETIC_FRAME_BYTES, run_simulation, simulate_tick};
