//! Common types shared across the mentorship crates.

use serde::{Deserialize, Serialize};

/// Score clamped to the closed [0.0, 1.0] range.
///
/// Every component score and the combined pairing score are carried as a
/// `Score`, so an out-of-range value cannot leak out of a scoring function.
/// Non-finite input (NaN) collapses to zero. Deserialized values go through
/// the same clamp.
///
/// # Examples
///
/// ```
/// use tutelage_core::Score;
///
/// let s = Score::new(0.75);
/// assert_eq!(s.value(), 0.75);
///
/// assert_eq!(Score::new(1.5).value(), 1.0);
/// assert_eq!(Score::new(-0.5).value(), 0.0);
/// assert_eq!(Score::new(f64::NAN).value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Create a new score, clamping the value to [0.0, 1.0].
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the inner value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Zero score.
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Neutral score (0.5), used when there is no data to judge by.
    #[must_use]
    pub fn neutral() -> Self {
        Self(0.5)
    }

    /// Full score (1.0).
    #[must_use]
    pub fn full() -> Self {
        Self(1.0)
    }

    /// Value expressed as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.0 * 100.0).round()
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
