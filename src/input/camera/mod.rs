//! Camera frames and cat classification.

pub mod classifier;
mod image;

pub use classifier::{FakeImageClassifier, FixedVerdictClassifier, ImageClassifier};
pub use image::CameraImage;
