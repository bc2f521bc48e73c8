//! Bandwidth-enhanced sinusoidal oscillator.
//!
//! The oscillator turns a stream of control targets (frequency, amplitude,
//! bandwidth) into samples. Each call to [`Oscillator::generate`] ramps the
//! parameters linearly from the previous targets to the new ones across the
//! block, so phase and amplitude stay continuous across block boundaries.
//!
//! The bandwidth channel is realized as narrowband noise: colored noise
//! (uniform white noise through a one-pole lowpass at [`NOISE_CUTOFF_HZ`],
//! scaled to unit variance) modulates the carrier. A sample is
//!
//! ```text
//! a[n] * ((1 - bw[n]) * sin(phase[n]) + bw[n] * noise[n] * sin(phase[n]))
//! ```
//!
//! and the phase advances by `2*pi*f[n]/sample_rate` after each sample.
//!
//! The noise generator is seeded deterministically and re-seeded on every
//! [`Oscillator::reset`], so rendering the same partial twice gives the same
//! samples no matter what was rendered before.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::filter::{Filter, NoiseColoring};
use crate::rng::create_rng;

/// Cutoff of the lowpass that colors the noise source.
pub const NOISE_CUTOFF_HZ: f64 = 500.0;

/// Noise seed used by [`Oscillator::new`].
pub const DEFAULT_NOISE_SEED: u32 = 0x5EED_0B5C;

/// Scales uniform [-1, 1) noise to unit variance.
const UNIFORM_TO_UNIT_VARIANCE: f64 = 1.732_050_807_568_877_2;

/// Stateful per-partial sample generator.
#[derive(Debug, Clone)]
pub struct Oscillator<C = Filter> {
    sample_rate: f64,
    phase: f64,
    frequency: f64,
    amplitude: f64,
    bandwidth: f64,
    noise_seed: u32,
    rng: Pcg32,
    coloring: C,
}

impl Oscillator<Filter> {
    /// Creates an oscillator with the default noise seed.
    pub fn new(sample_rate: f64) -> Self {
        Self::with_noise_seed(sample_rate, DEFAULT_NOISE_SEED)
    }

    /// Creates an oscillator with a specific noise seed.
    pub fn with_noise_seed(sample_rate: f64, seed: u32) -> Self {
        Self::with_coloring(sample_rate, seed, noise_filter(sample_rate))
    }
}

/// One-pole lowpass at [`NOISE_CUTOFF_HZ`], gain set for unit output variance
/// from unit-variance white input.
fn noise_filter(sample_rate: f64) -> Filter {
    let pole = (-TAU * NOISE_CUTOFF_HZ / sample_rate).exp();
    // Output variance of the one-pole is (1 - p) / (1 + p) times the input's.
    let gain = ((1.0 + pole) / (1.0 - pole)).sqrt();
    Filter::one_pole_lowpass(NOISE_CUTOFF_HZ, sample_rate).with_gain(gain)
}

impl<C: NoiseColoring> Oscillator<C> {
    /// Creates an oscillator with a custom noise coloring stage.
    pub fn with_coloring(sample_rate: f64, seed: u32, coloring: C) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            frequency: 0.0,
            amplitude: 0.0,
            bandwidth: 0.0,
            noise_seed: seed,
            rng: create_rng(seed),
            coloring,
        }
    }

    /// Resets the oscillator at a partial boundary.
    ///
    /// The phase accumulator is seeded with `phase` instead of continuing from
    /// the previous partial, and the noise source starts over.
    pub fn reset(&mut self, frequency: f64, amplitude: f64, bandwidth: f64, phase: f64) {
        self.frequency = frequency;
        self.amplitude = amplitude;
        self.bandwidth = bandwidth;
        self.phase = phase.rem_euclid(TAU);
        self.rng = create_rng(self.noise_seed);
        self.coloring.clear();
    }

    /// Accumulates `out.len()` samples into `out`, ramping from the previous
    /// targets to the given ones.
    ///
    /// The first sample uses the previous values exactly; after the call the
    /// given targets become the previous values. An empty block only adopts
    /// the targets.
    pub fn generate(&mut self, out: &mut [f64], frequency: f64, amplitude: f64, bandwidth: f64) {
        let count = out.len();
        if count > 0 {
            let step = 1.0 / count as f64;
            let df = (frequency - self.frequency) * step;
            let da = (amplitude - self.amplitude) * step;
            let dbw = (bandwidth - self.bandwidth) * step;
            let radians_per_hz = TAU / self.sample_rate;
            let noisy = self.bandwidth > 0.0 || bandwidth > 0.0;

            for (i, sample) in out.iter_mut().enumerate() {
                let n = i as f64;
                let f = self.frequency + df * n;
                let a = self.amplitude + da * n;
                let bw = self.bandwidth + dbw * n;

                let carrier = self.phase.sin();
                let noise = if noisy { self.next_noise() } else { 0.0 };
                *sample += a * ((1.0 - bw) * carrier + bw * noise * carrier);

                self.phase += f * radians_per_hz;
            }
            self.phase = self.phase.rem_euclid(TAU);
        }

        self.frequency = frequency;
        self.amplitude = amplitude;
        self.bandwidth = bandwidth;
    }

    fn next_noise(&mut self) -> f64 {
        let raw: f64 = self.rng.gen_range(-1.0..1.0) * UNIFORM_TO_UNIT_VARIANCE;
        self.coloring.color(raw)
    }

    /// Current phase in radians, wrapped to [0, 2pi).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Frequency target of the last block.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Amplitude target of the last block.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Bandwidth target of the last block.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
