// ============================================================================
// Quantity
// Immutable value with a propagated uncertainty and identity-keyed provenance
// ============================================================================

use super::errors::UncertaintyError;
use super::provenance::{Provenance, QuantityId};
use std::cmp::Ordering;
use std::fmt;

/// A nominal value carrying an absolute uncertainty.
///
/// Every constructed quantity receives a fresh [`QuantityId`]. Its provenance
/// records the identities of every quantity it was derived from, which the
/// arithmetic engine uses to detect correlated operands. Provenance holds
/// plain tags, so a derived value never keeps its ancestors alive.
///
/// Cloning preserves identity: a clone is the *same* quantity as far as
/// correlation is concerned.
///
/// # Example
/// ```
/// use tainty::numeric::Quantity;
///
/// let length = Quantity::new(12.34, 0.05);
/// let doubled = &length + &length;
/// assert_eq!(doubled.nominal(), 24.68);
/// assert!(doubled.is_correlated_with(&length));
/// ```
#[derive(Debug, Clone)]
pub struct Quantity {
    nominal: f64,
    deviation: f64,
    id: QuantityId,
    provenance: Provenance,
}

impl Quantity {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a root quantity.
    ///
    /// The deviation is stored as given; a negative deviation is not rejected.
    pub fn new(nominal: f64, deviation: f64) -> Self {
        let id = QuantityId::next();
        Self {
            nominal,
            deviation,
            id,
            provenance: Provenance::root(id),
        }
    }

    /// Create a root quantity with zero uncertainty.
    #[inline]
    pub fn exact(nominal: f64) -> Self {
        Self::new(nominal, 0.0)
    }

    /// Create a derived quantity whose provenance is the union of `parents`.
    pub(crate) fn derived(nominal: f64, deviation: f64, parents: &[&Provenance]) -> Self {
        let id = QuantityId::next();
        Self {
            nominal,
            deviation,
            id,
            provenance: Provenance::derive(id, parents),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Absolute uncertainty.
    #[inline]
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// Relative uncertainty, `deviation / nominal`.
    ///
    /// Infinite (or NaN for a zero deviation) when the nominal value is zero.
    #[inline]
    pub fn relative(&self) -> f64 {
        self.deviation / self.nominal
    }

    #[inline]
    pub fn id(&self) -> QuantityId {
        self.id
    }

    #[inline]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Falsy only when both nominal value and deviation are exactly zero.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        self.nominal != 0.0 || self.deviation != 0.0
    }

    /// True when either operand appears in the other's provenance.
    ///
    /// Only direct ancestry is detected: two values sharing a third ancestor
    /// are treated as independent.
    #[inline]
    pub fn is_correlated_with(&self, other: &Quantity) -> bool {
        self.provenance.contains(other.id) || other.provenance.contains(self.id)
    }

    // ========================================================================
    // Unary Operations
    // ========================================================================

    /// Absolute value of the nominal, keeping the deviation.
    pub fn abs(&self) -> Self {
        Self::derived(self.nominal.abs(), self.deviation, &[&self.provenance])
    }

    /// Negated nominal, keeping the deviation.
    pub fn negate(&self) -> Self {
        Self::derived(-self.nominal, self.deviation, &[&self.provenance])
    }
}

// ============================================================================
// Equality and Ordering
// ============================================================================

impl PartialEq for Quantity {
    /// Structural comparison of nominal value and deviation; identity is ignored.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.nominal == other.nominal && self.deviation == other.deviation
    }
}

impl PartialOrd for Quantity {
    /// Orders by nominal value only.
    ///
    /// Equal nominals with different deviations are incomparable, so such a
    /// pair is neither `<`, `>`, nor `==`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.nominal < other.nominal {
            Some(Ordering::Less)
        } else if self.nominal > other.nominal {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

// A quantity never equals a plain number, even one with the same nominal.
impl PartialEq<f64> for Quantity {
    #[inline]
    fn eq(&self, _other: &f64) -> bool {
        false
    }
}

impl PartialOrd<f64> for Quantity {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if self.nominal < *other {
            Some(Ordering::Less)
        } else if self.nominal > *other {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl PartialEq<Quantity> for f64 {
    #[inline]
    fn eq(&self, _other: &Quantity) -> bool {
        false
    }
}

impl PartialOrd<Quantity> for f64 {
    #[inline]
    fn partial_cmp(&self, other: &Quantity) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

// ============================================================================
// Display and Parsing
// ============================================================================

impl fmt::Display for Quantity {
    /// `nominal+/-deviation`, six decimals unless a precision is given.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(6);
        write!(
            f,
            "{:.prec$}+/-{:.prec$}",
            self.nominal,
            self.deviation,
            prec = precision
        )
    }
}

impl std::str::FromStr for Quantity {
    type Err = UncertaintyError;

    /// Build a root quantity from uncertainty notation.
    ///
    /// # Examples
    /// - "12.34(5)" -> 12.34 +/- 0.05
    /// - "1.20±0.03" -> 1.20 +/- 0.03
    /// - "(1.5+/-0.2)e3" -> 1500 +/- 200
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (nominal, deviation) = crate::parse::floats_from_str(s)?;
        Ok(Self::new(nominal, deviation))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ParseErrorKind;

    #[test]
    fn test_new_is_root() {
        let q = Quantity::new(2.0, 0.1);
        assert_eq!(q.nominal(), 2.0);
        assert_eq!(q.deviation(), 0.1);
        assert_eq!(q.provenance().len(), 1);
        assert!(q.provenance().contains(q.id()));
    }

    #[test]
    fn test_equal_values_have_distinct_identity() {
        let a = Quantity::new(1.0, 0.1);
        let b = Quantity::new(1.0, 0.1);
        assert_eq!(a, b);
        assert_ne!(a.id(), b.id());
        assert!(!a.is_correlated_with(&b));
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = Quantity::new(1.0, 0.1);
        let b = a.clone();
        assert_eq!(a.id(), b.id());
        assert!(a.is_correlated_with(&b));
    }

    #[test]
    fn test_relative() {
        let q = Quantity::new(4.0, 0.2);
        assert!((q.relative() - 0.05).abs() < 1e-15);

        let zero = Quantity::new(0.0, 0.2);
        assert!(zero.relative().is_infinite());
    }

    #[test]
    fn test_negative_deviation_not_rejected() {
        let q = Quantity::new(1.0, -0.5);
        assert_eq!(q.deviation(), -0.5);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Quantity::new(0.0, 0.0).is_truthy());
        assert!(Quantity::new(0.0, 0.1).is_truthy());
        assert!(Quantity::new(1.0, 0.0).is_truthy());
        assert!(Quantity::new(-1.0, 0.5).is_truthy());
    }

    #[test]
    fn test_ordering_is_by_nominal() {
        let a = Quantity::new(1.0, 0.5);
        let b = Quantity::new(2.0, 0.1);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= b);
        assert!(!(a >= b));
    }

    #[test]
    fn test_equal_nominal_different_deviation_is_incomparable() {
        let a = Quantity::new(1.0, 0.1);
        let b = Quantity::new(1.0, 0.2);
        assert!(!(a < b));
        assert!(!(a > b));
        assert!(a != b);
        assert!(!(a <= b));
        assert!(!(a >= b));
        assert_eq!(a.partial_cmp(&b), None);
    }

    #[test]
    fn test_le_ge_include_equality() {
        let a = Quantity::new(1.0, 0.1);
        let b = Quantity::new(1.0, 0.1);
        assert!(a <= b);
        assert!(a >= b);
    }

    #[test]
    fn test_compare_with_number() {
        let q = Quantity::new(1.5, 0.1);
        assert!(q < 2.0);
        assert!(q > 1.0);
        assert!(2.0 > q);
        assert!(q != 1.5);
        assert!(!(q <= 1.5));
    }

    #[test]
    fn test_abs_keeps_provenance() {
        let a = Quantity::new(-3.0, 0.2);
        let b = a.abs();
        assert_eq!(b.nominal(), 3.0);
        assert_eq!(b.deviation(), 0.2);
        assert!(b.provenance().contains(a.id()));
        assert!(b.is_correlated_with(&a));
    }

    #[test]
    fn test_display() {
        let q = Quantity::new(12.34, 0.05);
        assert_eq!(q.to_string(), "12.340000+/-0.050000");
        assert_eq!(format!("{:.2}", q), "12.34+/-0.05");
    }

    #[test]
    fn test_from_str() {
        let q: Quantity = "12.34(5)".parse().unwrap();
        assert_eq!(q.nominal(), 12.34);
        assert_eq!(q.deviation(), 0.05);
        assert_eq!(q.provenance().len(), 1);
    }

    #[test]
    fn test_from_str_invalid() {
        let result: Result<Quantity, _> = "not a number".parse();
        match result {
            Err(UncertaintyError::Parse(err)) => {
                assert_eq!(err.kind(), ParseErrorKind::NotParenUncert)
            },
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
