//! Cat detection boundary.
//!
//! The security service asks an [`ImageClassifier`] one question per frame:
//! does it show a cat with at least the given confidence? How the answer is
//! produced is up to the implementation. A classifier that cannot answer must
//! return an error rather than a "no cat" verdict.

use super::CameraImage;
use crate::error::{Result, SecurityError};
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Classifier contract consumed by the security service.
pub trait ImageClassifier: Send + Sync {
    /// Returns true if the image contains a cat with at least
    /// `confidence_threshold` percent confidence (0 to 100).
    fn image_contains_cat(&self, image: &CameraImage, confidence_threshold: f32) -> Result<bool>;
}

/// Reject thresholds outside [0, 100] (including NaN).
pub fn check_confidence_threshold(confidence_threshold: f32) -> Result<()> {
    if (0.0..=100.0).contains(&confidence_threshold) {
        Ok(())
    } else {
        Err(SecurityError::InvalidConfidenceThreshold(
            confidence_threshold,
        ))
    }
}

/// Stand-in classifier that draws a random confidence for every frame.
///
/// At the service's 50% threshold this behaves like a coin flip.
pub struct FakeImageClassifier {
    rng: Mutex<StdRng>,
}

impl FakeImageClassifier {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of verdicts, for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for FakeImageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClassifier for FakeImageClassifier {
    fn image_contains_cat(&self, image: &CameraImage, confidence_threshold: f32) -> Result<bool> {
        check_confidence_threshold(confidence_threshold)?;
        let confidence: f32 = self.rng.lock().gen_range(0.0..100.0);
        let cat = confidence > confidence_threshold;
        debug!(
            "[Camera] {} scored {:.1}% cat (threshold {:.1}%)",
            image.label(),
            confidence,
            confidence_threshold
        );
        Ok(cat)
    }
}

/// Classifier that always returns the same verdict.
pub struct FixedVerdictClassifier {
    verdict: bool,
}

impl FixedVerdictClassifier {
    pub fn new(verdict: bool) -> Self {
        Self { verdict }
    }
}

impl ImageClassifier for FixedVerdictClassifier {
    fn image_contains_cat(&self, _image: &CameraImage, confidence_threshold: f32) -> Result<bool> {
        check_confidence_threshold(confidence_threshold)?;
        Ok(self.verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CameraImage {
        CameraImage::new("test", vec![0; 4])
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(check_confidence_threshold(0.0).is_ok());
        assert!(check_confidence_threshold(50.0).is_ok());
        assert!(check_confidence_threshold(100.0).is_ok());
        assert!(check_confidence_threshold(-0.1).is_err());
        assert!(check_confidence_threshold(100.1).is_err());
        assert!(check_confidence_threshold(f32::NAN).is_err());
    }

    #[test]
    fn test_fixed_verdict() {
        assert!(
            FixedVerdictClassifier::new(true)
                .image_contains_cat(&frame(), 50.0)
                .unwrap()
        );
        assert!(
            !FixedVerdictClassifier::new(false)
                .image_contains_cat(&frame(), 50.0)
                .unwrap()
        );
    }

    #[test]
    fn test_fixed_verdict_rejects_bad_threshold() {
        let err = FixedVerdictClassifier::new(true)
            .image_contains_cat(&frame(), 150.0)
            .unwrap_err();
        assert!(matches!(err, SecurityError::InvalidConfidenceThreshold(t) if t == 150.0));
    }

    #[test]
    fn test_fake_classifier_is_reproducible_with_seed() {
        let a = FakeImageClassifier::with_seed(42);
        let b = FakeImageClassifier::with_seed(42);
        for _ in 0..16 {
            assert_eq!(
                a.image_contains_cat(&frame(), 50.0).unwrap(),
                b.image_contains_cat(&frame(), 50.0).unwrap()
            );
        }
    }

    #[test]
    fn test_fake_classifier_threshold_extremes() {
        let classifier = FakeImageClassifier::with_seed(1);
        for _ in 0..16 {
            // Confidence is drawn from [0, 100), never above 100.
            assert!(!classifier.image_contains_cat(&frame(), 100.0).unwrap());
        }
    }

    #[test]
    fn test_fake_classifier_sees_both_verdicts() {
        let classifier = FakeImageClassifier::with_seed(3);
        let verdicts: Vec<bool> = (0..64)
            .map(|_| classifier.image_contains_cat(&frame(), 50.0).unwrap())
            .collect();
        assert!(verdicts.contains(&true));
        assert!(verdicts.contains(&false));
    }
}
