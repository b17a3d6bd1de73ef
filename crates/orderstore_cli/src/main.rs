//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `orderstore_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("orderstore_core ping={}", orderstore_core::ping());
    println!("orderstore_core version={}", orderstore_core::core_version());
}
