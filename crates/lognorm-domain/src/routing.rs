//! Routing decision module
//!
//! A confidence score is only a routing signal: records at or above the
//! threshold are accepted automatically, everything else goes to manual review.

use serde::{Deserialize, Serialize};

/// Default acceptance threshold
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.85;

/// Where a normalized record should go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Score met the threshold
    Accept,

    /// Score below the threshold, or nothing could be extracted
    ManualReview,
}

impl RoutingDecision {
    /// Route a score against a threshold
    ///
    /// The threshold is clamped to [0.0, 1.0]. A NaN score or a NaN
    /// threshold always routes to manual review.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if threshold.is_nan() {
            return RoutingDecision::ManualReview;
        }

        if score >= threshold.clamp(0.0, 1.0) {
            RoutingDecision::Accept
        } else {
            RoutingDecision::ManualReview
        }
    }

    /// Get the decision name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::Accept => "accept",
            RoutingDecision::ManualReview => "manual_review",
        }
    }
}

impl std::fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a value into [0.0, 1.0], mapping NaN to 0.0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_at_threshold() {
        assert_eq!(RoutingDecision::from_score(0.85, 0.85), RoutingDecision::Accept);
        assert_eq!(RoutingDecision::from_score(1.0, 0.85), RoutingDecision::Accept);
    }

    #[test]
    fn test_below_threshold_needs_review() {
        assert_eq!(
            RoutingDecision::from_score(0.84, 0.85),
            RoutingDecision::ManualReview
        );
        assert_eq!(RoutingDecision::from_score(0.0, 0.85), RoutingDecision::ManualReview);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(RoutingDecision::from_score(1.0, 2.0), RoutingDecision::Accept);
        assert_eq!(RoutingDecision::from_score(0.0, -1.0), RoutingDecision::Accept);
    }

    #[test]
    fn test_nan_score_needs_review() {
        assert_eq!(
            RoutingDecision::from_score(f64::NAN, 0.5),
            RoutingDecision::ManualReview
        );
    }

    #[test]
    fn test_nan_threshold_needs_review() {
        assert_eq!(
            RoutingDecision::from_score(0.0, f64::NAN),
            RoutingDecision::ManualReview
        );
        assert_eq!(
            RoutingDecision::from_score(1.0, f64::NAN),
            RoutingDecision::ManualReview
        );
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(0.3), 0.3);
    }

    #[test]
    fn test_display() {
        assert_eq!(RoutingDecision::ManualReview.to_string(), "manual_review");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: clamping always lands in the unit interval
        #[test]
        fn test_clamp_unit_bounds(value in any::<f64>()) {
            let clamped = clamp_unit(value);
            prop_assert!((0.0..=1.0).contains(&clamped));
        }

        /// Property: a higher score never routes worse than a lower one
        #[test]
        fn test_routing_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0, threshold in 0.0f64..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            if RoutingDecision::from_score(low, threshold) == RoutingDecision::Accept {
                prop_assert_eq!(RoutingDecision::from_score(high, threshold), RoutingDecision::Accept);
            }
        }
    }
}
