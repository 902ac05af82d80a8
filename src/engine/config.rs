// ============================================================================
// Propagation Configuration
// Policies for the edge cases the propagation formulas leave open
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Negative Variance Policy
// ============================================================================

/// What to do when a correlation correction pushes the variance below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NegativeVariancePolicy {
    /// Clamp the variance to zero and log a warning
    #[default]
    Clamp,
    /// Fail the operation with `UncertaintyError::NegativeVariance`
    Reject,
}

// ============================================================================
// Deviation Sign
// ============================================================================

/// Sign handling for deviations produced by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviationSign {
    /// Results always carry a non-negative deviation
    #[default]
    Normalize,
    /// Keep whatever sign the formula yields: `n·c·a.r` for a negative
    /// exponent, `|n|·a.r` in scalar division when `a.n < 0`, and a negative
    /// input deviation carried through scalar addition and subtraction
    Preserve,
}

// ============================================================================
// Complete Propagation Configuration
// ============================================================================

/// Configuration for a [`Propagator`](super::Propagator)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropagationConfig {
    /// Policy for negative pre-square-root variance
    pub negative_variance: NegativeVariancePolicy,

    /// Sign handling for result deviations
    pub deviation_sign: DeviationSign,

    /// Apply `+2·a.s·b.s` to the variance of a correlated sum.
    /// Off by default: addition carries no correlation term unless asked.
    pub correlated_addition: bool,

    /// A negative variance no larger in magnitude than `tolerance` times the
    /// uncorrected variance is rounding residue and clamps to zero under
    /// either policy
    pub variance_tolerance: f64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            negative_variance: NegativeVariancePolicy::Clamp,
            deviation_sign: DeviationSign::Normalize,
            correlated_addition: false,
            variance_tolerance: 1e-9,
        }
    }
}

impl PropagationConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set negative variance policy
    pub fn with_negative_variance(mut self, policy: NegativeVariancePolicy) -> Self {
        self.negative_variance = policy;
        self
    }

    /// Builder method: Set deviation sign handling
    pub fn with_deviation_sign(mut self, sign: DeviationSign) -> Self {
        self.deviation_sign = sign;
        self
    }

    /// Builder method: Enable or disable the correlated-addition term
    pub fn with_correlated_addition(mut self, enabled: bool) -> Self {
        self.correlated_addition = enabled;
        self
    }

    /// Builder method: Set rounding tolerance for negative variance
    pub fn with_variance_tolerance(mut self, tolerance: f64) -> Self {
        self.variance_tolerance = tolerance;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.variance_tolerance.is_finite() || self.variance_tolerance < 0.0 {
            return Err("Variance tolerance must be finite and non-negative".to_string());
        }
        Ok(())
    }
}
