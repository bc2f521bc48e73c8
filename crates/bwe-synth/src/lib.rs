//! BWE Synthesis Engine
//!
//! This crate renders bandwidth-enhanced partials into sample buffers.
//!
//! # Overview
//!
//! Every partial drives one bandwidth-enhanced oscillator: a sinusoid whose
//! carrier is modulated by lowpass-filtered noise in proportion to the
//! partial's bandwidth. The [`Synthesizer`] adds fades at both ends of each
//! partial, silences anything at or above half the sample rate, and
//! accumulates into a buffer the caller owns. The [`JitterySynthesizer`]
//! additionally perturbs amplitudes with random signals that can be shared
//! across groups of partials.
//!
//! # Determinism
//!
//! All synthesis is deterministic. The noise source is reseeded for every
//! partial and jitter streams are keyed by seed, label and start time, so the
//! output does not depend on the order partials are rendered in. The crate
//! uses PCG32 for all random number generation, with seeds derived via
//! BLAKE3 hashing.
//!
//! # Example
//!
//! ```
//! use bwe_model::{Breakpoint, Partial};
//! use bwe_synth::Synthesizer;
//!
//! let partial = Partial::from_breakpoints(
//!     1,
//!     [
//!         Breakpoint::new(0.0, 440.0, 0.5, 0.0, 0.0),
//!         Breakpoint::new(0.5, 440.0, 0.5, 0.2, 0.0),
//!     ],
//! )
//! .unwrap();
//!
//! let mut buffer = Vec::new();
//! let mut synth = Synthesizer::new(44100.0, &mut buffer).unwrap();
//! synth.synthesize(&partial).unwrap();
//!
//! assert_eq!(buffer.len(), 22_095);
//! ```
//!
//! # Crate Structure
//!
//! - [`synthesizer`] - Partial rendering with fades
//! - [`jitter`] - Jittery synthesizer extension
//! - [`oscillator`] - Bandwidth-enhanced oscillator
//! - [`filter`] - ARMA filter for noise coloring
//! - [`buffer`] - Mixing and level helpers
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod buffer;
pub mod error;
pub mod filter;
pub mod jitter;
pub mod oscillator;
pub mod rng;
pub mod synthesizer;

pub use error::{SynthError, SynthResult};
pub use filter::{Filter, NoiseColoring};
pub use jitter::JitterySynthesizer;
pub use oscillator::Oscillator;
pub use synthesizer::{Synthesizer, DEFAULT_FADE_TIME};
