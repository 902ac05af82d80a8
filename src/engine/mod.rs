// ============================================================================
// Engine Module
// Correlation-aware arithmetic over uncertain quantities
// ============================================================================

mod operand;
mod operators;
mod propagator;

pub mod config;

pub use config::{DeviationSign, NegativeVariancePolicy, PropagationConfig};
pub use operand::{BinaryOp, Operand};
pub use propagator::Propagator;
