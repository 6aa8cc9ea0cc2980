//! Integration Tests Runner
//!
//! This binary documents how to run the stub-backend integration tests

use anyhow::Result;

fn main() -> Result<()> {
    println!("Sidecar Client Integration Tests");
    println!("================================");
    println!();
    println!("Available tests:");
    println!("  - Configuration variable CRUD flow: cargo test --test configuration_variable_flow -- --nocapture");
    println!("  - Configuration layering: cargo test --test config_loading");
    println!();
    println!("To run all integration tests:");
    println!("  cargo test -- --nocapture");
    println!();
    println!("Tests run against an in-process stub backend; no live server is required.");

    Ok(())
}
