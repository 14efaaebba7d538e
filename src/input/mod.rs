//! Input sources for the security service.
//!
//! - `camera`: camera frames and the cat classifier boundary
//! - `simulation`: synthetic sensor and camera activity

pub mod camera;
pub mod simulation;
