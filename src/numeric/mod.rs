// ============================================================================
// Numeric Module
// Uncertain quantities and their identity bookkeeping
// ============================================================================
//
// This module provides:
// - Quantity: nominal value + absolute deviation + provenance
// - QuantityId / Provenance: identity tags used for correlation detection
// - UncertaintyError / ParseError: error types for arithmetic and parsing
//
// Design principles:
// - Quantities are immutable; every operation yields a new one
// - Provenance stores integer tags, never references to other quantities
// - Fallible operations return Result (no panics)

mod errors;
mod provenance;
mod quantity;

pub use errors::{NumericResult, ParseError, ParseErrorKind, UncertaintyError};
pub use provenance::{Provenance, QuantityId};
pub use quantity::Quantity;
