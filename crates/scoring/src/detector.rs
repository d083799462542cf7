//! Weak Signal Detector
//!
//! Flags dimensions whose evidence is both minimal and floor-valued.
//!
//! A dimension is weak when it has exactly one unit of exposure and its
//! score is at or below the lowest score one unit of exposure can produce.
//! Zero exposure is "unmeasured", not weak, and is never flagged.

use trait_assessment_core::{ExposureCounts, NormalizedTraitVector, TraitDimension};

use crate::bank::MIN_OPTION_CONTRIBUTION;
use crate::scorer::{normalize, ScoreReport};

/// Lower exposure bound (inclusive) for a weak signal
pub const WEAK_SIGNAL_MIN_EXPOSURE: f64 = 1.0;
/// Upper exposure bound (inclusive) for a weak signal
pub const WEAK_SIGNAL_MAX_EXPOSURE: f64 = 1.0;

/// Highest score still considered weak: the score of a single unit of
/// exposure carrying the minimum option contribution. 56 for the 1..=4 scale.
pub fn weak_signal_ceiling() -> u8 {
    normalize(
        f64::from(MIN_OPTION_CONTRIBUTION) * WEAK_SIGNAL_MAX_EXPOSURE,
        WEAK_SIGNAL_MAX_EXPOSURE,
    )
}

/// Stateless weak-signal policy
pub struct WeakSignalDetector;

impl WeakSignalDetector {
    /// Dimensions carrying weak evidence. Order is not significant.
    pub fn detect(normalized: &NormalizedTraitVector, counts: &ExposureCounts) -> Vec<TraitDimension> {
        let ceiling = weak_signal_ceiling();
        TraitDimension::ALL
            .into_iter()
            .filter(|d| {
                let exposure = *counts.get(*d);
                exposure >= WEAK_SIGNAL_MIN_EXPOSURE
                    && exposure <= WEAK_SIGNAL_MAX_EXPOSURE
                    && *normalized.get(*d) <= ceiling
            })
            .collect()
    }

    /// Convenience over a scorer report
    pub fn detect_report(report: &ScoreReport) -> Vec<TraitDimension> {
        Self::detect(&report.normalized, &report.counts)
    }
}
