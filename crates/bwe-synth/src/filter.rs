//! ARMA digital filter used to color the oscillator's noise source.
//!
//! [`Filter`] is a Direct Form II realization of a filter given by its
//! difference-equation coefficients, stored in order of increasing delay,
//! with a gain applied to the output.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use crate::error::{SynthError, SynthResult};

/// Turns raw noise samples into colored noise samples.
pub trait NoiseColoring {
    /// Filters one raw sample.
    fn color(&mut self, raw: f64) -> f64;

    /// Clears the internal state.
    fn clear(&mut self);
}

/// Direct Form II ARMA filter.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Feed-forward (moving average) coefficients.
    ma: Vec<f64>,
    /// Feedback (autoregressive) coefficients, `ar[0] == 1`.
    ar: Vec<f64>,
    /// Delay line, most recent state first.
    delay: VecDeque<f64>,
    /// Output gain.
    gain: f64,
}

impl Filter {
    /// Creates a filter from feed-forward and feedback coefficients.
    ///
    /// Coefficients are normalized by the zero-delay feedback coefficient.
    ///
    /// # Arguments
    /// * `ma` - Feed-forward coefficients, in order of increasing delay
    /// * `ar` - Feedback coefficients, in order of increasing delay
    /// * `gain` - Gain applied to the filter output
    ///
    /// # Errors
    /// `InvalidObject` if either coefficient list is empty or the zero-delay
    /// feedback coefficient is zero.
    pub fn new(ma: &[f64], ar: &[f64], gain: f64) -> SynthResult<Self> {
        if ma.is_empty() {
            return Err(SynthError::invalid_object(
                "filter needs at least one feed-forward coefficient",
            ));
        }
        let a0 = match ar.first() {
            Some(&a0) if a0 != 0.0 => a0,
            _ => {
                return Err(SynthError::invalid_object(
                    "filter has a zero feedback coefficient at zero delay",
                ))
            }
        };

        let ma: Vec<f64> = ma.iter().map(|c| c / a0).collect();
        let mut ar: Vec<f64> = ar.iter().map(|c| c / a0).collect();
        ar[0] = 1.0;

        Ok(Self::from_normalized(ma, ar, gain))
    }

    fn from_normalized(ma: Vec<f64>, ar: Vec<f64>, gain: f64) -> Self {
        let order = ma.len().max(ar.len()) - 1;
        Self {
            ma,
            ar,
            delay: VecDeque::from(vec![0.0; order]),
            gain,
        }
    }

    /// One-pole lowpass with unity gain at DC.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `sample_rate` - Sample rate in Hz
    pub fn one_pole_lowpass(cutoff: f64, sample_rate: f64) -> Self {
        let pole = (-TAU * cutoff / sample_rate).exp();
        Self::from_normalized(vec![1.0 - pole], vec![1.0, -pole], 1.0)
    }

    /// Returns this filter with a different output gain.
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Output gain.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Computes the next output sample from an input sample.
    pub fn sample(&mut self, input: f64) -> f64 {
        // w[n] = x[n] - sum(a[k] * w[n-k]), y[n] = sum(b[k] * w[n-k])
        let mut w = input;
        for (a, state) in self.ar.iter().skip(1).zip(self.delay.iter()) {
            w -= a * state;
        }

        let mut y = self.ma[0] * w;
        for (b, state) in self.ma.iter().skip(1).zip(self.delay.iter()) {
            y += b * state;
        }

        if !self.delay.is_empty() {
            self.delay.pop_back();
            self.delay.push_front(w);
        }

        y * self.gain
    }

    /// Zeroes the delay line.
    pub fn reset(&mut self) {
        self.delay.iter_mut().for_each(|s| *s = 0.0);
    }
}

impl NoiseColoring for Filter {
    fn color(&mut self, raw: f64) -> f64 {
        self.sample(raw)
    }

    fn clear(&mut self) {
        self.reset();
    }
}
