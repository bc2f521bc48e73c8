//! BWE Morphing Engine
//!
//! This crate morphs between two collections of labeled partials under three
//! time-varying weight functions, one each for frequency, amplitude, and
//! bandwidth.
//!
//! # Overview
//!
//! - Partials with the same nonzero label in both collections **correspond**
//!   and are interpolated breakpoint by breakpoint.
//! - When a label has several partials on one side, they are first
//!   **distilled** into one partial whose amplitude is the sum of theirs.
//! - Unlabeled partials and labels present on one side only are
//!   **crossfaded** using the amplitude weight.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use bwe_model::{Breakpoint, ConstantEnvelope, Partial};
//! use bwe_morph::Morph;
//!
//! let a = vec![Partial::from_breakpoints(1, [Breakpoint::sinusoid(0.0, 200.0, 0.2)]).unwrap()];
//! let b = vec![Partial::from_breakpoints(1, [Breakpoint::sinusoid(0.0, 400.0, 0.2)]).unwrap()];
//!
//! let mut morph = Morph::new(Arc::new(ConstantEnvelope(0.5)));
//! morph.morph(&a, &b);
//!
//! let halfway = &morph.partials()[0];
//! assert!((halfway.frequency_at(0.0) - 300.0).abs() < 1e-9);
//! ```

pub mod distill;
pub mod morph;

pub use distill::distill;
pub use morph::{morph_collections, Morph, UNLABELED};
