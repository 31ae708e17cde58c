//! Bayesian odds combination.
//!
//! Evidence weights act as likelihood ratios multiplied into the prior odds.
//! Weights are clamped before entering the odds so a single runaway weight
//! cannot saturate the posterior, but the reported `likelihood` is the
//! product of the raw, unclamped weights. That divergence is deliberate and
//! matched to the upstream system; do not "fix" one side without the other.

use crate::fusion::Evidence;

pub const MIN_PRIOR: f64 = 0.0001;
pub const MAX_PRIOR: f64 = 0.9999;
pub const MIN_WEIGHT: f64 = 0.01;
pub const MAX_WEIGHT: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct BayesianResult {
    /// Posterior probability, always finite and strictly inside (0, 1).
    pub posterior: f64,
    /// Product of the raw evidence weights (unclamped).
    pub likelihood: f64,
    /// The evidence, echoed unmodified.
    pub evidence: Vec<Evidence>,
}

/// Combine a prior with evidence weights into a posterior via sequential odds
/// multiplication. Total: never fails, output always finite.
pub fn compute_confidence(prior: f64, evidence: Vec<Evidence>) -> BayesianResult {
    let prior = if prior.is_finite() { prior } else { MIN_PRIOR };
    let prior = prior.clamp(MIN_PRIOR, MAX_PRIOR);

    let mut odds = prior / (1.0 - prior);
    for item in &evidence {
        let weight = if item.weight.is_finite() {
            item.weight
        } else {
            1.0
        };
        odds *= weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
    }

    // Long evidence chains can overflow the odds; saturate at the clamp
    // ceiling instead of emitting NaN.
    let posterior = if odds.is_finite() {
        odds / (1.0 + odds)
    } else {
        MAX_PRIOR
    };

    let likelihood = evidence
        .iter()
        .map(|item| {
            if item.weight == 0.0 || !item.weight.is_finite() {
                1.0
            } else {
                item.weight
            }
        })
        .product();

    BayesianResult {
        posterior,
        likelihood,
        evidence,
    }
}
