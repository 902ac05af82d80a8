// ============================================================================
// Tainty Library
// Correlation-aware uncertainty propagation with uncertainty-notation parsing
// ============================================================================

//! # Tainty
//!
//! Numbers with a propagated uncertainty, and a parser for the notation
//! people write them in.
//!
//! ## Features
//!
//! - **Uncertain quantities**: nominal value + absolute deviation, immutable
//! - **Correlation tracking** through identity tags: `a - a` is exactly zero,
//!   `a * a` propagates like a square
//! - **Operator overloading** for quantity/quantity and quantity/`f64`
//! - **Literal parsing** of `12.34(5)`, `1.20±0.03`, `1.5(2)e3`, `(1.5+/-0.2)×10³`
//! - **Configurable edge cases**: negative-variance and deviation-sign policies
//!
//! ## Example
//!
//! ```rust
//! use tainty::prelude::*;
//!
//! let length: Quantity = "12.34(5)".parse().unwrap();
//! let width = Quantity::new(3.0, 0.02);
//!
//! let area = &length * &width;
//! println!("area = {}", area);
//!
//! // Subtracting a value from itself cancels its uncertainty
//! let zero = &length - &length;
//! assert_eq!(zero.deviation(), 0.0);
//!
//! // Strict propagation through an explicit propagator
//! let strict = Propagator::new(
//!     PropagationConfig::new().with_negative_variance(NegativeVariancePolicy::Reject),
//! ).unwrap();
//! let ratio = strict.div(&area, &width).unwrap();
//! assert!((ratio.nominal() - 12.34).abs() < 1e-12);
//! ```

pub mod engine;
pub mod numeric;
pub mod parse;

// Re-exports for convenience
pub mod prelude {
    pub use crate::engine::{
        BinaryOp, DeviationSign, NegativeVariancePolicy, Operand, PropagationConfig, Propagator,
    };
    pub use crate::numeric::{
        NumericResult, ParseError, ParseErrorKind, Provenance, Quantity, QuantityId,
        UncertaintyError,
    };
    pub use crate::parse::floats_from_str;
}
