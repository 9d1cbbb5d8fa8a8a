//! Precision / recall / F-beta tallies.
//!
//! A [`Score`] is a bag of true/false positive/negative counts. Counts are
//! real-valued because the chunk aligner accumulates per-chunk weights.
//!
//! # Example
//! ```
//! use layered_gec::Score;
//!
//! let score = Score::with_counts(3.0, 1.0, 1.0, 0.0, 0.5);
//! assert_eq!(score.precision(), 0.75);
//! assert_eq!(score.recall(), 0.75);
//! assert!((score.f() - 0.75).abs() < 1e-12);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::errors::{GecError, GecResult};

/// Beta used when none is configured (F0.5, precision-weighted).
pub const DEFAULT_BETA: f64 = 0.5;

/// True/false positive/negative tally with an F-beta weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub tp: f64,
    pub fp: f64,
    #[serde(rename = "fn")]
    pub fn_: f64,
    pub tn: f64,
    pub beta: f64,
}

impl Score {
    /// An all-zero tally.
    pub fn new(beta: f64) -> Self {
        Self::with_counts(0.0, 0.0, 0.0, 0.0, beta)
    }

    pub fn with_counts(tp: f64, fp: f64, fn_: f64, tn: f64, beta: f64) -> Self {
        Self {
            tp,
            fp,
            fn_,
            tn,
            beta,
        }
    }

    /// `1.0` when there are no false positives, even if nothing was proposed.
    pub fn precision(&self) -> f64 {
        if self.fp == 0.0 {
            return 1.0;
        }
        self.tp / (self.tp + self.fp)
    }

    /// `1.0` when there are no false negatives, even if nothing was expected.
    pub fn recall(&self) -> f64 {
        if self.fn_ == 0.0 {
            return 1.0;
        }
        self.tp / (self.tp + self.fn_)
    }

    pub fn f(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            return 0.0;
        }
        let beta2 = self.beta * self.beta;
        (1.0 + beta2) * p * r / (beta2 * p + r)
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.tp + self.fp + self.fn_ + self.tn;
        if total == 0.0 {
            return 0.0;
        }
        (self.tp + self.tn) / total
    }

    /// Add two tallies, rejecting mismatched beta instead of panicking.
    pub fn try_add(self, other: Score) -> GecResult<Score> {
        if self.beta != other.beta {
            return Err(GecError::BetaMismatch {
                left: self.beta,
                right: other.beta,
            });
        }
        Ok(Score {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            fn_: self.fn_ + other.fn_,
            tn: self.tn + other.tn,
            beta: self.beta,
        })
    }

    /// Key compared when picking the better of two candidates:
    /// F first, then more true positives, then fewer false positives,
    /// then fewer false negatives.
    pub fn rank_key(&self) -> [f64; 4] {
        [self.f(), self.tp, -self.fp, -self.fn_]
    }

    /// Lexicographic comparison of [`Score::rank_key`].
    pub fn rank_cmp(&self, other: &Score) -> Ordering {
        self.rank_key()
            .iter()
            .zip(other.rank_key().iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Strictly ranks below `other`.
    pub fn is_worse_than(&self, other: &Score) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(DEFAULT_BETA)
    }
}

impl Add for Score {
    type Output = Score;

    /// # Panics
    /// If the operands carry different beta.
    fn add(self, other: Score) -> Score {
        assert!(
            self.beta == other.beta,
            "cannot add scores with different beta ({} vs {})",
            self.beta,
            other.beta
        );
        Score {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            fn_: self.fn_ + other.fn_,
            tn: self.tn + other.tn,
            beta: self.beta,
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, other: Score) {
        *self = *self + other;
    }
}

impl<'a> AddAssign<&'a Score> for Score {
    fn add_assign(&mut self, other: &'a Score) {
        *self = *self + *other;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "F-{}={}", self.beta, self.f())?;
        writeln!(f, " Prec={}", self.precision())?;
        writeln!(f, " Rec={}", self.recall())?;
        writeln!(
            f,
            " TP={}, FP={}, FN={}, TN={}",
            self.tp, self.fp, self.fn_, self.tn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_score() {
        let s = Score::new(0.5);
        assert_eq!(s.precision(), 1.0);
        assert_eq!(s.recall(), 1.0);
        // nothing proposed, nothing missed: a perfect match
        assert_eq!(s.f(), 1.0);
        assert_eq!(s.accuracy(), 0.0);
    }

    #[test]
    fn test_zero_precision_and_recall() {
        let s = Score::with_counts(0.0, 2.0, 3.0, 0.0, 0.5);
        assert_eq!(s.precision(), 0.0);
        assert_eq!(s.recall(), 0.0);
        assert_eq!(s.f(), 0.0);
    }

    #[test]
    fn test_equal_precision_recall() {
        let s = Score::with_counts(3.0, 1.0, 1.0, 0.0, 0.5);
        assert_eq!(s.precision(), 0.75);
        assert_eq!(s.recall(), 0.75);
        assert!(approx(s.f(), 0.75));
    }

    #[test]
    fn test_beta_weighting() {
        // p = 1.0, r = 0.5
        let s = Score::with_counts(1.0, 0.0, 1.0, 0.0, 0.5);
        assert!(approx(s.f(), 1.25 * 0.5 / (0.25 + 0.5)));
        let s = Score::with_counts(1.0, 0.0, 1.0, 0.0, 1.0);
        assert!(approx(s.f(), 2.0 / 3.0));
    }

    #[test]
    fn test_accuracy() {
        let s = Score::with_counts(2.0, 1.0, 1.0, 4.0, 0.5);
        assert!(approx(s.accuracy(), 6.0 / 8.0));
    }

    #[test]
    fn test_add_sums_counts() {
        let a = Score::with_counts(1.0, 2.0, 3.0, 4.0, 0.5);
        let b = Score::with_counts(0.5, 0.25, 1.0, 2.0, 0.5);
        let c = Score::with_counts(2.0, 0.0, 0.0, 1.0, 0.5);

        let ab = a + b;
        assert_eq!(ab.tp, 1.5);
        assert_eq!(ab.fp, 2.25);
        assert_eq!(ab.fn_, 4.0);
        assert_eq!(ab.tn, 6.0);
        assert_eq!(ab.beta, 0.5);

        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn test_add_assign() {
        let mut total = Score::new(0.5);
        total += Score::with_counts(1.0, 0.0, 0.0, 0.0, 0.5);
        total += &Score::with_counts(0.0, 1.0, 0.0, 0.0, 0.5);
        assert_eq!(total, Score::with_counts(1.0, 1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    #[should_panic(expected = "different beta")]
    fn test_add_beta_mismatch_panics() {
        let _ = Score::new(0.5) + Score::new(1.0);
    }

    #[test]
    fn test_try_add_beta_mismatch() {
        let err = Score::new(0.5).try_add(Score::new(2.0)).unwrap_err();
        assert!(matches!(err, GecError::BetaMismatch { left, right } if left == 0.5 && right == 2.0));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_rank_order() {
        let better_f = Score::with_counts(1.0, 0.0, 0.0, 0.0, 0.5);
        let worse_f = Score::with_counts(1.0, 1.0, 0.0, 0.0, 0.5);
        assert!(worse_f.is_worse_than(&better_f));
        assert!(!better_f.is_worse_than(&worse_f));

        // Same F (1.0): more true positives wins.
        let one = Score::with_counts(1.0, 0.0, 0.0, 0.0, 0.5);
        let two = Score::with_counts(2.0, 0.0, 0.0, 0.0, 0.5);
        assert!(one.is_worse_than(&two));

        // Same F and tp: fewer false negatives wins.
        let a = Score::with_counts(0.0, 1.0, 1.0, 0.0, 0.5);
        let b = Score::with_counts(0.0, 1.0, 2.0, 0.0, 0.5);
        assert!(b.is_worse_than(&a));

        // Equal keys are not strictly worse.
        assert!(!a.is_worse_than(&a));
        assert_eq!(a.rank_cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        let s = Score::with_counts(3.0, 1.0, 1.0, 0.0, 0.5);
        assert_eq!(
            s.to_string(),
            "F-0.5=0.75\n Prec=0.75\n Rec=0.75\n TP=3, FP=1, FN=1, TN=0\n"
        );
    }
}
