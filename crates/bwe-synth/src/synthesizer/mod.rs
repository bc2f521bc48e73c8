//! Partial rendering with onset and release fades.
//!
//! [`Synthesizer`] drives one [`Oscillator`](crate::oscillator::Oscillator)
//! through the breakpoints of each partial and accumulates the result into a
//! shared sample buffer.

#[allow(clippy::module_inception)]
mod synthesizer;

#[cfg(test)]
mod tests_buffer;
#[cfg(test)]
mod tests_errors;
#[cfg(test)]
mod tests_padding;

// Re-export public API
pub use synthesizer::{Synthesizer, DEFAULT_FADE_TIME};

pub(crate) use synthesizer::AmplitudeShaper;
