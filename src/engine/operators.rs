// ============================================================================
// Operator Overloads
// std::ops impls for Quantity ⊗ Quantity and Quantity ⊗ f64
// ============================================================================
//
// Every impl routes through a default-configured Propagator. The quantity
// rules use the clamping path, so the operators never fail; build a
// Propagator with a custom config to get the rejecting behaviour.

use super::operand::BinaryOp;
use super::propagator::Propagator;
use crate::numeric::{NumericResult, Quantity};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

fn add_qn(a: &Quantity, c: f64) -> Quantity {
    Propagator::default().add_scalar(a, c)
}

fn add_nq(c: f64, a: &Quantity) -> Quantity {
    Propagator::default().add_scalar(a, c)
}

fn sub_qn(a: &Quantity, c: f64) -> Quantity {
    Propagator::default().sub_scalar(a, c)
}

fn sub_nq(c: f64, a: &Quantity) -> Quantity {
    Propagator::default().scalar_sub(c, a)
}

fn mul_qn(a: &Quantity, c: f64) -> Quantity {
    Propagator::default().mul_scalar(a, c)
}

fn mul_nq(c: f64, a: &Quantity) -> Quantity {
    Propagator::default().mul_scalar(a, c)
}

fn div_qn(a: &Quantity, c: f64) -> Quantity {
    Propagator::default().div_scalar(a, c)
}

fn div_nq(c: f64, a: &Quantity) -> Quantity {
    Propagator::default().scalar_div(c, a)
}

macro_rules! quantity_binop {
    ($trait:ident, $method:ident, $op:expr, $qn:ident, $nq:ident) => {
        impl $trait<&Quantity> for &Quantity {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: &Quantity) -> Quantity {
                Propagator::default().combine_clamped($op, self, rhs)
            }
        }

        impl $trait<Quantity> for Quantity {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: Quantity) -> Quantity {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Quantity> for Quantity {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: &Quantity) -> Quantity {
                (&self).$method(rhs)
            }
        }

        impl $trait<Quantity> for &Quantity {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: Quantity) -> Quantity {
                self.$method(&rhs)
            }
        }

        impl $trait<f64> for &Quantity {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: f64) -> Quantity {
                $qn(self, rhs)
            }
        }

        impl $trait<f64> for Quantity {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: f64) -> Quantity {
                $qn(&self, rhs)
            }
        }

        impl $trait<&Quantity> for f64 {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: &Quantity) -> Quantity {
                $nq(self, rhs)
            }
        }

        impl $trait<Quantity> for f64 {
            type Output = Quantity;

            #[inline]
            fn $method(self, rhs: Quantity) -> Quantity {
                $nq(self, &rhs)
            }
        }
    };
}

quantity_binop!(Add, add, BinaryOp::Add, add_qn, add_nq);
quantity_binop!(Sub, sub, BinaryOp::Sub, sub_qn, sub_nq);
quantity_binop!(Mul, mul, BinaryOp::Mul, mul_qn, mul_nq);
quantity_binop!(Div, div, BinaryOp::Div, div_qn, div_nq);

impl Neg for &Quantity {
    type Output = Quantity;

    #[inline]
    fn neg(self) -> Quantity {
        self.negate()
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    #[inline]
    fn neg(self) -> Quantity {
        self.negate()
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    /// Left fold with `+`. An empty sum is an exact zero.
    fn sum<I: Iterator<Item = &'a Quantity>>(mut iter: I) -> Self {
        let Some(first) = iter.next() else {
            return Quantity::exact(0.0);
        };
        iter.fold(first + 0.0, |acc, q| &acc + q)
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        let items: Vec<Quantity> = iter.collect();
        items.iter().sum()
    }
}

// ============================================================================
// Exponentiation
// ============================================================================

impl Quantity {
    /// `self ^ exponent`, both uncertain.
    ///
    /// # Errors
    /// `DomainError` when `self` has a non-positive nominal value.
    pub fn pow(&self, exponent: &Quantity) -> NumericResult<Quantity> {
        Propagator::default().pow(self, exponent)
    }

    /// `self ^ exponent` for an exact exponent.
    pub fn powf(&self, exponent: f64) -> Quantity {
        Propagator::default().powf(self, exponent)
    }

    /// `base ^ exponent` for an exact base.
    ///
    /// # Errors
    /// `DomainError` when `base` is not positive.
    pub fn exp_base(base: f64, exponent: &Quantity) -> NumericResult<Quantity> {
        Propagator::default().exp_base(base, exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::UncertaintyError;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0)
    }

    #[test]
    fn test_operand_forms() {
        let a = Quantity::new(2.0, 0.1);
        let b = Quantity::new(4.0, 0.2);

        assert_eq!((&a + &b).nominal(), 6.0);
        assert_eq!((a.clone() - &b).nominal(), -2.0);
        assert_eq!((&a * b.clone()).nominal(), 8.0);
        assert_eq!((a.clone() / b.clone()).nominal(), 0.5);

        assert_eq!((&a + 1.0).nominal(), 3.0);
        assert_eq!((1.0 - &a).nominal(), -1.0);
        assert_eq!((3.0 * &a).nominal(), 6.0);
        assert_eq!((8.0 / a.clone()).nominal(), 4.0);
    }

    #[test]
    fn test_self_subtraction_is_exact_zero() {
        let a = Quantity::new(3.7, 0.23);
        let d = &a - &a;
        assert_eq!(d.nominal(), 0.0);
        assert_eq!(d.deviation(), 0.0);
        assert!(!d.is_truthy());
    }

    #[test]
    fn test_clone_subtraction_is_correlated() {
        let a = Quantity::new(3.7, 0.23);
        let d = &a - a.clone();
        assert_eq!(d.deviation(), 0.0);
    }

    #[test]
    fn test_self_multiplication_matches_square() {
        let a = Quantity::new(-1.5, 0.2);
        let sq = &a * &a;
        assert!(close(sq.nominal(), 2.25));
        assert!(close(sq.deviation(), 2.0 * 1.5 * 0.2));
    }

    #[test]
    fn test_independent_addition() {
        let a = Quantity::new(1.0, 0.3);
        let b = Quantity::new(2.0, 0.4);
        let c = &a + &b;
        assert!(close(c.deviation(), 0.5));
    }

    #[test]
    fn test_reversed_scalar_ops_keep_provenance() {
        let a = Quantity::new(2.0, 0.1);
        let c = 10.0 - &a;
        assert_eq!(c.nominal(), 8.0);
        assert_eq!(c.deviation(), 0.1);
        assert!(c.is_correlated_with(&a));

        let d = 1.0 / &a;
        assert_eq!(d.nominal(), 0.5);
        assert!(close(d.deviation(), 0.025));
    }

    #[test]
    fn test_negation() {
        let a = Quantity::new(2.0, 0.1);
        let n = -&a;
        assert_eq!(n.nominal(), -2.0);
        assert_eq!(n.deviation(), 0.1);
        assert!(n.is_correlated_with(&a));
        assert_eq!((-n).nominal(), 2.0);
    }

    #[test]
    fn test_sum() {
        let values = vec![
            Quantity::new(1.0, 0.1),
            Quantity::new(2.0, 0.2),
            Quantity::new(3.0, 0.2),
        ];
        let total: Quantity = values.iter().sum();
        assert!(close(total.nominal(), 6.0));
        assert!(close(total.deviation(), 0.09_f64.sqrt()));
        for v in &values {
            assert!(total.provenance().contains(v.id()));
        }
        // Each step keeps its own tag and the intermediate sums' tags
        assert_eq!(total.provenance().len(), 2 * values.len());

        let empty: Quantity = Vec::<Quantity>::new().into_iter().sum();
        assert!(!empty.is_truthy());
    }

    #[test]
    fn test_pow_methods() {
        let a = Quantity::new(2.0, 0.1);
        let b = Quantity::new(3.0, 0.05);

        let c = a.pow(&b).unwrap();
        assert!(close(c.nominal(), 8.0));
        assert!(c.provenance().contains(a.id()) && c.provenance().contains(b.id()));

        let sq = a.powf(2.0);
        assert!(close(sq.nominal(), 4.0));
        assert!(close(sq.deviation(), 0.4));

        let e = Quantity::exp_base(10.0, &a).unwrap();
        assert!(close(e.nominal(), 100.0));
        assert!(close(e.deviation(), 100.0 * 10.0_f64.ln() * 0.1));

        let negative = Quantity::new(-2.0, 0.1);
        assert!(matches!(
            negative.pow(&b),
            Err(UncertaintyError::DomainError { .. })
        ));
    }
}
