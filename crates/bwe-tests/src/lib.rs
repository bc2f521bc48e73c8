//! BWE End-to-End Test Infrastructure
//!
//! This crate holds integration tests that exercise the model, synthesis,
//! morphing, and CLI crates together:
//!
//! - **Synthesis properties**: fades, Nyquist guard, phase, crossfade energy
//! - **Morph properties**: identity, bounds, distillation (proptest)
//! - **Determinism**: byte-identical rendering across runs and render orders
//! - **CLI**: render and morph documents on disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bwe-tests
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{compute_hash, samples_to_bytes, verify_determinism, DeterminismResult};
pub use fixtures::{constant_partial, mean_square, ProjectFixture};
