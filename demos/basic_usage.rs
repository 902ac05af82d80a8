// ============================================================================
// Basic Usage Example
// ============================================================================

use tainty::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Uncertainty Propagation Example ===\n");

    // Parse measurements written in uncertainty notation
    println!("Parsing measurements...");
    let literals = ["12.34(5)", "1.20±0.03", "1.5(2)e3", "(2.5+/-0.1)×10^2", "12.3"];
    for literal in literals {
        match floats_from_str(literal) {
            Ok((nominal, deviation)) => {
                println!("  {:<18} -> {} +/- {}", literal, nominal, deviation)
            },
            Err(err) => println!("  {:<18} -> {}", literal, err),
        }
    }

    let length: Quantity = match "12.34(5)".parse() {
        Ok(q) => q,
        Err(err) => {
            eprintln!("failed to parse length: {}", err);
            return;
        },
    };
    let width = Quantity::new(3.00, 0.02);

    // Independent operands
    println!("\nIndependent operands:");
    println!("  length + width = {}", &length + &width);
    println!("  length * width = {}", &length * &width);
    println!("  length / width = {}", &length / &width);

    // Correlated operands
    println!("\nCorrelated operands:");
    println!("  length - length = {}", &length - &length);
    println!("  length * length = {}", &length * &length);
    let area = &length * &width;
    println!("  area / width    = {}", &area / &width);

    // Mixed with plain numbers
    println!("\nWith plain numbers:");
    println!("  2 * length      = {}", 2.0 * &length);
    println!("  length ^ 2      = {}", length.powf(2.0));
    match Quantity::exp_base(10.0, &width) {
        Ok(q) => println!("  10 ^ width      = {}", q),
        Err(err) => println!("  10 ^ width      -> {}", err),
    }

    // Dynamic dispatch with typed rejection
    println!("\nDynamic operands:");
    let propagator = Propagator::default();
    let rhs = Operand::from_value(&"x");
    match rhs.and_then(|rhs| propagator.apply(BinaryOp::Add, Operand::from(&length), rhs)) {
        Ok(q) => println!("  length + \"x\"   = {}", q),
        Err(err) => println!("  length + \"x\"   -> {}", err),
    }
    match propagator.apply(BinaryOp::FloorDiv, Operand::from(&length), Operand::Number(2.0)) {
        Ok(q) => println!("  length // 2     = {}", q),
        Err(err) => println!("  length // 2     -> {}", err),
    }

    println!("\n=== Example Complete ===");
}
