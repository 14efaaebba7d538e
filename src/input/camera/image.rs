//! Camera frames handed to the image classifier.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::fs;
use std::path::Path;

/// An opaque camera frame.
///
/// The engine never inspects the pixels; it only forwards the frame to an
/// [`ImageClassifier`](super::ImageClassifier).
#[derive(Clone, Debug)]
pub struct CameraImage {
    label: String,
    data: Vec<u8>,
    captured_at: DateTime<Utc>,
}

impl CameraImage {
    pub fn new(label: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            data,
            captured_at: Utc::now(),
        }
    }

    /// Read an encoded image file as-is.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let data = fs::read(path)?;
        Ok(Self::new(path.display().to_string(), data))
    }

    /// A frame of random noise, used when no real camera is attached.
    pub fn synthetic(rng: &mut impl Rng, len: usize) -> Self {
        let mut data = vec![0u8; len];
        rng.fill(data.as_mut_slice());
        Self::new("synthetic", data)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_file_keeps_bytes_and_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let image = CameraImage::from_file(&path).unwrap();
        assert_eq!(image.data(), &[0xFF, 0xD8, 0xFF]);
        assert!(image.label().ends_with("frame.jpg"));
    }

    #[test]
    fn test_frame_is_stamped_at_capture() {
        let before = Utc::now();
        let image = CameraImage::new("porch", vec![1, 2, 3]);
        assert!(image.captured_at() >= before);
        assert!(image.captured_at() <= Utc::now());
    }

    #[test]
    fn test_synthetic_frame_has_requested_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let image = CameraImage::synthetic(&mut rng, 64);
        assert_eq!(image.data().len(), 64);
        assert_eq!(image.label(), "synthetic");
    }
}
