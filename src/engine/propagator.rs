// ============================================================================
// Propagator
// Correlation-aware variance propagation for the arithmetic operators
// ============================================================================

use super::config::{DeviationSign, NegativeVariancePolicy, PropagationConfig};
use super::operand::{BinaryOp, Operand};
use crate::numeric::{NumericResult, Provenance, Quantity, UncertaintyError};

/// Result of an operation before the square root is taken.
///
/// The final deviation is `scale * sqrt(variance)`. For the additive rules
/// `variance` is absolute and `scale` is one; for the multiplicative rules it
/// is a relative variance and `scale` is `|nominal|`.
#[derive(Debug, Clone, Copy)]
struct Estimate {
    nominal: f64,
    variance: f64,
    /// Variance before any correlation correction
    uncorrected: f64,
    scale: f64,
}

/// Applies the propagation rules under one [`PropagationConfig`].
///
/// Two quantity operands are correlated when either one appears in the
/// other's provenance. Correlated operands are treated as fully dependent
/// (weight 1); anything else is independent.
///
/// # Example
/// ```
/// use tainty::engine::{BinaryOp, Operand, Propagator};
/// use tainty::numeric::Quantity;
///
/// let propagator = Propagator::default();
/// let a = Quantity::new(2.0, 0.1);
/// let b = Quantity::new(4.0, 0.2);
///
/// let product = propagator
///     .apply(BinaryOp::Mul, Operand::from(&a), Operand::from(&b))
///     .unwrap();
/// assert_eq!(product.nominal(), 8.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Propagator {
    config: PropagationConfig,
}

impl Propagator {
    /// Build a propagator after validating `config`.
    ///
    /// # Errors
    /// Returns the validation message when the configuration is rejected.
    pub fn new(config: PropagationConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Apply `lhs OP rhs` where at least one side is a quantity.
    ///
    /// # Errors
    /// - `UnsupportedOperation` for floor division and modulo
    /// - `TypeMismatch` when neither operand is a quantity
    /// - `DomainError` / `NegativeVariance` from the individual rules
    pub fn apply(&self, op: BinaryOp, lhs: Operand<'_>, rhs: Operand<'_>) -> NumericResult<Quantity> {
        if matches!(op, BinaryOp::FloorDiv | BinaryOp::Rem) {
            return Err(UncertaintyError::UnsupportedOperation(op));
        }

        match (lhs, rhs) {
            (Operand::Quantity(a), Operand::Quantity(b)) => match op {
                BinaryOp::Pow => self.pow(a, b),
                _ => self.combine(op, a, b),
            },
            (Operand::Quantity(a), Operand::Number(c)) => Ok(match op {
                BinaryOp::Add => self.add_scalar(a, c),
                BinaryOp::Sub => self.sub_scalar(a, c),
                BinaryOp::Mul => self.mul_scalar(a, c),
                BinaryOp::Div => self.div_scalar(a, c),
                _ => self.powf(a, c),
            }),
            (Operand::Number(c), Operand::Quantity(a)) => match op {
                BinaryOp::Add => Ok(self.add_scalar(a, c)),
                BinaryOp::Sub => Ok(self.scalar_sub(c, a)),
                BinaryOp::Mul => Ok(self.mul_scalar(a, c)),
                BinaryOp::Div => Ok(self.scalar_div(c, a)),
                _ => self.exp_base(c, a),
            },
            (Operand::Number(_), Operand::Number(_)) => Err(UncertaintyError::TypeMismatch {
                expected: "at least one quantity operand",
                found: "f64",
            }),
        }
    }

    // ========================================================================
    // Quantity ⊗ Quantity
    // ========================================================================

    /// `a + b`
    pub fn add(&self, a: &Quantity, b: &Quantity) -> NumericResult<Quantity> {
        self.combine(BinaryOp::Add, a, b)
    }

    /// `a - b`
    pub fn sub(&self, a: &Quantity, b: &Quantity) -> NumericResult<Quantity> {
        self.combine(BinaryOp::Sub, a, b)
    }

    /// `a * b`
    pub fn mul(&self, a: &Quantity, b: &Quantity) -> NumericResult<Quantity> {
        self.combine(BinaryOp::Mul, a, b)
    }

    /// `a / b`
    pub fn div(&self, a: &Quantity, b: &Quantity) -> NumericResult<Quantity> {
        self.combine(BinaryOp::Div, a, b)
    }

    /// `a ^ b`
    ///
    /// # Errors
    /// `DomainError` when `a` has a non-positive nominal value.
    pub fn pow(&self, a: &Quantity, b: &Quantity) -> NumericResult<Quantity> {
        let ln_a = ln("exponentiation base", a.nominal())?;
        let nominal = a.nominal().powf(b.nominal());

        let uncorrected = sos(b.nominal() * a.relative(), ln_a * b.deviation());
        let mut variance = uncorrected;
        if self.correlated(BinaryOp::Pow, a, b) {
            variance += 2.0 * b.nominal() * ln_a / a.nominal();
        }

        let estimate = Estimate {
            nominal,
            variance,
            uncorrected,
            scale: nominal.abs(),
        };
        self.resolve(BinaryOp::Pow, estimate, &[a.provenance(), b.provenance()])
    }

    /// Add, subtract, multiply or divide two quantities.
    fn combine(&self, op: BinaryOp, a: &Quantity, b: &Quantity) -> NumericResult<Quantity> {
        let estimate = self.estimate(op, a, b);
        self.resolve(op, estimate, &[a.provenance(), b.provenance()])
    }

    /// Infallible counterpart of [`combine`](Self::combine) that always
    /// clamps a negative variance. Backs the `std::ops` operator impls.
    pub(crate) fn combine_clamped(&self, op: BinaryOp, a: &Quantity, b: &Quantity) -> Quantity {
        let estimate = self.estimate(op, a, b);
        self.settle(op, estimate, &[a.provenance(), b.provenance()])
    }

    fn estimate(&self, op: BinaryOp, a: &Quantity, b: &Quantity) -> Estimate {
        let correlated = self.correlated(op, a, b);

        match op {
            BinaryOp::Add | BinaryOp::Sub => {
                let uncorrected = sos(a.deviation(), b.deviation());
                let cross = 2.0 * a.deviation() * b.deviation();
                let variance = match op {
                    BinaryOp::Sub if correlated => uncorrected - cross,
                    BinaryOp::Add if correlated && self.config.correlated_addition => {
                        uncorrected + cross
                    },
                    _ => uncorrected,
                };
                let nominal = if op == BinaryOp::Add {
                    a.nominal() + b.nominal()
                } else {
                    a.nominal() - b.nominal()
                };
                Estimate {
                    nominal,
                    variance,
                    uncorrected,
                    scale: 1.0,
                }
            },
            _ => {
                let uncorrected = sos(a.relative(), b.relative());
                let cross = 2.0 * a.deviation() * b.deviation() / (a.nominal() * b.nominal());
                let (nominal, variance) = if op == BinaryOp::Div {
                    let v = if correlated { uncorrected - cross } else { uncorrected };
                    (a.nominal() / b.nominal(), v)
                } else {
                    let v = if correlated { uncorrected + cross } else { uncorrected };
                    (a.nominal() * b.nominal(), v)
                };
                Estimate {
                    nominal,
                    variance,
                    uncorrected,
                    scale: nominal.abs(),
                }
            },
        }
    }

    fn correlated(&self, op: BinaryOp, a: &Quantity, b: &Quantity) -> bool {
        let correlated = a.is_correlated_with(b);
        if correlated {
            tracing::trace!("correlated operands {} {} {}", a.id(), op.symbol(), b.id());
        }
        correlated
    }

    // ========================================================================
    // Quantity ⊗ Number
    // ========================================================================

    /// `a + c` (and `c + a`)
    pub fn add_scalar(&self, a: &Quantity, c: f64) -> Quantity {
        self.derive(a.nominal() + c, a.deviation(), a)
    }

    /// `a - c`
    pub fn sub_scalar(&self, a: &Quantity, c: f64) -> Quantity {
        self.derive(a.nominal() - c, a.deviation(), a)
    }

    /// `c - a`
    pub fn scalar_sub(&self, c: f64, a: &Quantity) -> Quantity {
        self.derive(c - a.nominal(), a.deviation(), a)
    }

    /// `a * c` (and `c * a`)
    pub fn mul_scalar(&self, a: &Quantity, c: f64) -> Quantity {
        self.derive(a.nominal() * c, (a.deviation() * c).abs(), a)
    }

    /// `a / c`
    pub fn div_scalar(&self, a: &Quantity, c: f64) -> Quantity {
        let nominal = a.nominal() / c;
        self.derive(nominal, nominal.abs() * a.relative(), a)
    }

    /// `c / a`
    pub fn scalar_div(&self, c: f64, a: &Quantity) -> Quantity {
        let nominal = c / a.nominal();
        self.derive(nominal, nominal.abs() * a.relative(), a)
    }

    /// `a ^ c`
    ///
    /// The raw deviation `n·c·a.r` is negative for negative exponents;
    /// [`DeviationSign`] decides whether it is kept.
    pub fn powf(&self, a: &Quantity, c: f64) -> Quantity {
        let nominal = a.nominal().powf(c);
        self.derive(nominal, nominal * c * a.relative(), a)
    }

    /// `c ^ a`
    ///
    /// # Errors
    /// `DomainError` when `c` is not positive.
    pub fn exp_base(&self, c: f64, a: &Quantity) -> NumericResult<Quantity> {
        let ln_c = ln("exponentiation base", c)?;
        let nominal = c.powf(a.nominal());
        Ok(self.derive(nominal, nominal.abs() * (ln_c * a.deviation()).abs(), a))
    }

    // ========================================================================
    // Finishing
    // ========================================================================

    fn derive(&self, nominal: f64, deviation: f64, parent: &Quantity) -> Quantity {
        Quantity::derived(nominal, self.signed(deviation), &[parent.provenance()])
    }

    fn signed(&self, deviation: f64) -> f64 {
        match self.config.deviation_sign {
            DeviationSign::Normalize => deviation.abs(),
            DeviationSign::Preserve => deviation,
        }
    }

    /// Negative beyond what rounding can explain.
    fn overshoots(&self, estimate: &Estimate) -> bool {
        estimate.variance < -(self.config.variance_tolerance * estimate.uncorrected.abs())
    }

    fn resolve(
        &self,
        op: BinaryOp,
        estimate: Estimate,
        parents: &[&Provenance],
    ) -> NumericResult<Quantity> {
        if self.config.negative_variance == NegativeVariancePolicy::Reject
            && self.overshoots(&estimate)
        {
            return Err(UncertaintyError::NegativeVariance {
                operation: op.symbol(),
                variance: estimate.variance,
            });
        }
        Ok(self.settle(op, estimate, parents))
    }

    fn settle(&self, op: BinaryOp, estimate: Estimate, parents: &[&Provenance]) -> Quantity {
        let variance = if estimate.variance < 0.0 {
            if self.overshoots(&estimate) {
                tracing::warn!(
                    "{} produced negative variance {}; clamping to zero",
                    op,
                    estimate.variance
                );
            }
            0.0
        } else {
            estimate.variance
        };

        let deviation = estimate.scale * variance.sqrt();
        Quantity::derived(estimate.nominal, self.signed(deviation), parents)
    }
}

/// Sum of squares.
#[inline]
fn sos(x: f64, y: f64) -> f64 {
    x * x + y * y
}

fn ln(operation: &'static str, value: f64) -> NumericResult<f64> {
    if value > 0.0 {
        Ok(value.ln())
    } else {
        Err(UncertaintyError::DomainError { operation, value })
    }
}

// ============================================================================
// Tests
// ============================================================================
