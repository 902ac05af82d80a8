// ============================================================================
// Parse Module
// Uncertainty notation: "12.34(5)", "1.20±0.03", "(1.5+/-0.2)e3"
// ============================================================================
//
// Independent of the arithmetic engine: the parser yields plain
// (nominal, deviation) pairs, which `Quantity::from_str` turns into a root
// quantity.

mod exponent;
mod literal;

pub use literal::{floats_from_str, parse_error_in_parentheses};
