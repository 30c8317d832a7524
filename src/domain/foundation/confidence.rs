//! Confidence value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A confidence score between 0.0 and 1.0 inclusive.
///
/// Deserialization rejects values outside that range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// No confidence at all. Used for degraded results.
    pub const ZERO: Self = Self(0.0);

    /// Full confidence.
    pub const ONE: Self = Self(1.0);

    /// Neutral confidence reported when there is no evidence either way.
    pub const NEUTRAL: Self = Self(0.5);

    /// Creates a new Confidence, clamping to the valid range.
    ///
    /// NaN is treated as zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Confidence, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("confidence", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Arithmetic mean of the given scores, or `None` when there are none.
    pub fn mean<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = Confidence>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), c| (sum + c.0, count + 1));

        if count == 0 {
            None
        } else {
            Some(Self::new(sum / count as f64))
        }
    }

    /// Human-readable band for this confidence.
    pub fn label(&self) -> &'static str {
        match self.0 {
            v if v >= 0.9 => "Very High",
            v if v >= 0.75 => "High",
            v if v >= 0.6 => "Moderate",
            v if v >= 0.4 => "Low",
            _ => "Very Low",
        }
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_new_accepts_valid_values() {
        assert_eq!(Confidence::new(0.0).value(), 0.0);
        assert_eq!(Confidence::new(0.5).value(), 0.5);
        assert_eq!(Confidence::new(1.0).value(), 1.0);
    }

    #[test]
    fn confidence_new_clamps_out_of_range() {
        assert_eq!(Confidence::new(1.3).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn confidence_try_new_rejects_out_of_range() {
        match Confidence::try_new(1.5) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "confidence");
                assert_eq!(actual, 1.5);
            }
            _ => panic!("Expected OutOfRange error"),
        }
        assert!(Confidence::try_new(0.7).is_ok());
    }

    #[test]
    fn confidence_deserialization_validates_range() {
        assert_eq!(serde_json::from_str::<Confidence>("0.25").unwrap().value(), 0.25);
        assert!(serde_json::from_str::<Confidence>("1.5").is_err());
        assert_eq!(serde_json::to_string(&Confidence::new(0.8)).unwrap(), "0.8");
    }

    #[test]
    fn confidence_mean_of_nothing_is_none() {
        assert!(Confidence::mean(Vec::new()).is_none());
    }

    #[test]
    fn confidence_mean_averages_scores() {
        let mean = Confidence::mean(vec![Confidence::new(0.6), Confidence::new(0.8)]).unwrap();
        assert!((mean.value() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn confidence_labels_follow_bands() {
        assert_eq!(Confidence::new(0.95).label(), "Very High");
        assert_eq!(Confidence::new(0.9).label(), "Very High");
        assert_eq!(Confidence::new(0.8).label(), "High");
        assert_eq!(Confidence::new(0.6).label(), "Moderate");
        assert_eq!(Confidence::new(0.45).label(), "Low");
        assert_eq!(Confidence::new(0.1).label(), "Very Low");
    }

    #[test]
    fn confidence_displays_as_percentage() {
        assert_eq!(Confidence::new(0.875).to_string(), "87.5%");
        assert_eq!(Confidence::ZERO.to_string(), "0.0%");
    }

    #[test]
    fn confidence_serializes_transparently() {
        let json = serde_json::to_string(&Confidence::new(0.25)).unwrap();
        assert_eq!(json, "0.25");
    }
}
