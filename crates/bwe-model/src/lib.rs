//! BWE Partial Model
//!
//! This crate provides the data model of the Reassigned Bandwidth-Enhanced
//! Additive Sound Model: a sound is a collection of [`Partial`]s, each an
//! ordered series of [`Breakpoint`]s describing the frequency, amplitude,
//! bandwidth (noise energy fraction), and phase of one sinusoidal track.
//!
//! # Overview
//!
//! - **Breakpoints** are immutable samples of a track's envelope at one instant.
//! - **Partials** keep their breakpoints ordered by strictly increasing time and
//!   carry an integer label used for morph correspondence and jitter grouping.
//! - **Envelopes** map time to a scalar and drive morph weights and jitter.
//! - **Transforms** are pure `&Partial -> Partial` functions over breakpoints.
//!
//! # Example
//!
//! ```
//! use bwe_model::{Breakpoint, Partial};
//!
//! let partial = Partial::from_breakpoints(
//!     1,
//!     [
//!         Breakpoint::new(0.0, 440.0, 0.5, 0.0, 0.0),
//!         Breakpoint::new(1.0, 445.0, 0.25, 0.1, 0.0),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(partial.label(), 1);
//! assert!((partial.frequency_at(0.5) - 442.5).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! - [`breakpoint`]: Breakpoint type
//! - [`partial`]: Partial type and envelope queries
//! - [`envelope`]: Weighting functions
//! - [`transform`]: Pure breakpoint transforms and collection helpers
//! - [`error`]: Model error type

pub mod breakpoint;
pub mod envelope;
pub mod error;
pub mod partial;
pub mod transform;

// Re-export commonly used types at the crate root
pub use breakpoint::Breakpoint;
pub use envelope::{ConstantEnvelope, Envelope, LinearEnvelope};
pub use error::{ModelError, ModelResult};
pub use partial::Partial;
