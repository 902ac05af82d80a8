// ============================================================================
// Operands
// Tagged operand shapes accepted by the propagation engine
// ============================================================================

use crate::numeric::{NumericResult, Quantity, UncertaintyError};
use std::any::{type_name, Any};
use std::fmt;

/// Binary operations the engine dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Declared for completeness; always `UnsupportedOperation`
    FloorDiv,
    /// Declared for completeness; always `UnsupportedOperation`
    Rem,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Rem => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryOp::Add => "addition",
            BinaryOp::Sub => "subtraction",
            BinaryOp::Mul => "multiplication",
            BinaryOp::Div => "division",
            BinaryOp::Pow => "exponentiation",
            BinaryOp::FloorDiv => "floor division",
            BinaryOp::Rem => "modulo",
        };
        f.write_str(name)
    }
}

/// One side of a binary operation: an uncertain quantity or a plain number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Quantity(&'a Quantity),
    Number(f64),
}

impl<'a> Operand<'a> {
    const EXPECTED: &'static str = "quantity or number";

    /// Classify an arbitrary value at the API boundary.
    ///
    /// Accepts `Quantity`, floats and primitive integers. Anything else is a
    /// `TypeMismatch`.
    ///
    /// ```
    /// use tainty::engine::Operand;
    /// use tainty::numeric::UncertaintyError;
    ///
    /// assert!(matches!(Operand::from_value(&2_i32), Ok(Operand::Number(n)) if n == 2.0));
    /// assert!(matches!(
    ///     Operand::from_value(&"x"),
    ///     Err(UncertaintyError::TypeMismatch { .. })
    /// ));
    /// ```
    pub fn from_value<T: Any>(value: &'a T) -> NumericResult<Self> {
        let any = value as &dyn Any;

        if let Some(q) = any.downcast_ref::<Quantity>() {
            return Ok(Operand::Quantity(q));
        }

        let number = if let Some(v) = any.downcast_ref::<f64>() {
            *v
        } else if let Some(v) = any.downcast_ref::<f32>() {
            f64::from(*v)
        } else if let Some(v) = any.downcast_ref::<i32>() {
            f64::from(*v)
        } else if let Some(v) = any.downcast_ref::<u32>() {
            f64::from(*v)
        } else if let Some(v) = any.downcast_ref::<i64>() {
            *v as f64
        } else if let Some(v) = any.downcast_ref::<u64>() {
            *v as f64
        } else if let Some(v) = any.downcast_ref::<isize>() {
            *v as f64
        } else if let Some(v) = any.downcast_ref::<usize>() {
            *v as f64
        } else {
            return Err(UncertaintyError::TypeMismatch {
                expected: Self::EXPECTED,
                found: type_name::<T>(),
            });
        };

        Ok(Operand::Number(number))
    }
}

impl<'a> From<&'a Quantity> for Operand<'a> {
    fn from(q: &'a Quantity) -> Self {
        Operand::Quantity(q)
    }
}

impl From<f64> for Operand<'_> {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}
