//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `roster_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny CLI probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("roster_core ping={}", roster_core::ping());
    println!("roster_core version={}", roster_core::core_version());
}
