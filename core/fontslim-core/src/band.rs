//! Target size band (made by FontLab https://www.fontlab.com/)

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

const KIB: u64 = 1024;

/// Closed interval of acceptable output sizes, in KB (1024 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetBand {
    pub min_kb: u64,
    pub max_kb: u64,
}

impl Default for TargetBand {
    fn default() -> Self {
        Self {
            min_kb: 500,
            max_kb: 700,
        }
    }
}

/// Where an output landed relative to the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Suspiciously small; the character list may be missing glyphs.
    BelowMinimum,
    WithinRange,
    AboveMaximum,
}

impl SizeClass {
    /// Only an oversized font fails the run's size goal.
    pub fn clears_success(self) -> bool {
        matches!(self, SizeClass::AboveMaximum)
    }
}

impl TargetBand {
    pub fn new(min_kb: u64, max_kb: u64) -> Result<Self> {
        if min_kb > max_kb {
            return Err(anyhow!(
                "target band minimum ({min_kb}KB) exceeds maximum ({max_kb}KB)"
            ));
        }
        Ok(Self { min_kb, max_kb })
    }

    /// Classify a byte size. Both bounds are inclusive.
    pub fn classify(&self, bytes: u64) -> SizeClass {
        if bytes > self.max_kb.saturating_mul(KIB) {
            SizeClass::AboveMaximum
        } else if bytes < self.min_kb.saturating_mul(KIB) {
            SizeClass::BelowMinimum
        } else {
            SizeClass::WithinRange
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let band = TargetBand::default();
        assert_eq!(band.classify(500 * KIB), SizeClass::WithinRange);
        assert_eq!(band.classify(700 * KIB), SizeClass::WithinRange);
        assert_eq!(band.classify(600 * KIB), SizeClass::WithinRange);
    }

    #[test]
    fn outside_the_band() {
        let band = TargetBand::default();
        assert_eq!(band.classify(499 * KIB), SizeClass::BelowMinimum);
        assert_eq!(band.classify(500 * KIB - 1), SizeClass::BelowMinimum);
        assert_eq!(band.classify(701 * KIB), SizeClass::AboveMaximum);
        assert_eq!(band.classify(700 * KIB + 1), SizeClass::AboveMaximum);
        assert_eq!(band.classify(0), SizeClass::BelowMinimum);
    }

    #[test]
    fn only_oversize_clears_success() {
        assert!(SizeClass::AboveMaximum.clears_success());
        assert!(!SizeClass::BelowMinimum.clears_success());
        assert!(!SizeClass::WithinRange.clears_success());
    }

    #[test]
    fn rejects_inverted_band() {
        assert!(TargetBand::new(700, 500).is_err());
        let single = TargetBand::new(600, 600).expect("degenerate band");
        assert_eq!(single.classify(600 * KIB), SizeClass::WithinRange);
    }
}
