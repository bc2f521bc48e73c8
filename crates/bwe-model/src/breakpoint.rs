//! Breakpoint: one timestamped sample of a Partial's parameter envelope.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// A sample of a Partial's envelope at one instant.
///
/// Amplitude and bandwidth are clamped to be non-negative when a breakpoint
/// is built. Bandwidth is the fraction of the instantaneous energy rendered as
/// noise; keeping it within [0, 1] is left to callers
/// (see [`crate::transform::clamp_bandwidth`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BreakpointFields")]
pub struct Breakpoint {
    time: f64,
    frequency: f64,
    amplitude: f64,
    bandwidth: f64,
    phase: f64,
}

/// Raw serialized form, routed through [`Breakpoint::new`] for clamping.
#[derive(Deserialize)]
struct BreakpointFields {
    time: f64,
    frequency: f64,
    #[serde(default)]
    amplitude: f64,
    #[serde(default)]
    bandwidth: f64,
    #[serde(default)]
    phase: f64,
}

impl From<BreakpointFields> for Breakpoint {
    fn from(fields: BreakpointFields) -> Self {
        Breakpoint::new(
            fields.time,
            fields.frequency,
            fields.amplitude,
            fields.bandwidth,
            fields.phase,
        )
    }
}

impl Breakpoint {
    /// Creates a breakpoint.
    ///
    /// # Arguments
    /// * `time` - Time in seconds
    /// * `frequency` - Frequency in Hz
    /// * `amplitude` - Linear amplitude (negative values clamp to 0)
    /// * `bandwidth` - Noise energy fraction (negative values clamp to 0)
    /// * `phase` - Phase in radians
    pub fn new(time: f64, frequency: f64, amplitude: f64, bandwidth: f64, phase: f64) -> Self {
        Self {
            time,
            frequency,
            amplitude: amplitude.max(0.0),
            bandwidth: bandwidth.max(0.0),
            phase,
        }
    }

    /// Creates a purely sinusoidal breakpoint with zero phase.
    pub fn sinusoid(time: f64, frequency: f64, amplitude: f64) -> Self {
        Self::new(time, frequency, amplitude, 0.0, 0.0)
    }

    /// Time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Linear amplitude.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Noise energy fraction.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Phase in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Returns a copy moved to another time.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Returns a copy with another frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Returns a copy with another amplitude (clamped to be non-negative).
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude.max(0.0);
        self
    }

    /// Returns a copy with another bandwidth (clamped to be non-negative).
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth.max(0.0);
        self
    }

    /// Returns a copy with another phase.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Checks that every field is finite and the frequency is positive.
    pub fn validate(&self) -> ModelResult<()> {
        if !self.time.is_finite() {
            return Err(ModelError::invalid_breakpoint(self.time, "time must be finite"));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ModelError::invalid_breakpoint(
                self.time,
                format!("frequency must be positive, got {}", self.frequency),
            ));
        }
        if !self.amplitude.is_finite() {
            return Err(ModelError::invalid_breakpoint(self.time, "amplitude must be finite"));
        }
        if !self.bandwidth.is_finite() {
            return Err(ModelError::invalid_breakpoint(self.time, "bandwidth must be finite"));
        }
        if !self.phase.is_finite() {
            return Err(ModelError::invalid_breakpoint(self.time, "phase must be finite"));
        }
        Ok(())
    }
}
