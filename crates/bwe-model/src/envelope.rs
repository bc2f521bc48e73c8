//! Weighting functions: time in seconds to a scalar.
//!
//! Envelopes drive the morph weights (frequency, amplitude, bandwidth) and the
//! jitter gain and coherence controls. Any `Fn(f64) -> f64` closure that is
//! `Send + Sync` is an envelope too.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// A function of time that can be evaluated at any real time.
pub trait Envelope: Send + Sync {
    /// Evaluates the envelope at `time` seconds.
    fn value_at(&self, time: f64) -> f64;
}

impl<F> Envelope for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn value_at(&self, time: f64) -> f64 {
        self(time)
    }
}

/// An envelope with the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantEnvelope(pub f64);

impl Envelope for ConstantEnvelope {
    fn value_at(&self, _time: f64) -> f64 {
        self.0
    }
}

/// Breakpoint envelope with linear interpolation between points.
///
/// Values before the first point and after the last hold the boundary value.
/// An envelope without points evaluates to 0 everywhere.
///
/// Serialized as a list of `[time, value]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct LinearEnvelope {
    points: Vec<(f64, f64)>,
}

impl LinearEnvelope {
    /// Creates an envelope with no points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an envelope holding `value` everywhere (a single point at time 0).
    pub fn constant(value: f64) -> Self {
        let mut env = Self::new();
        env.insert(0.0, value);
        env
    }

    /// Creates an envelope from `(time, value)` points in any order.
    pub fn from_points<I>(points: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut env = Self::new();
        for (time, value) in points {
            if !time.is_finite() || !value.is_finite() {
                return Err(ModelError::invalid_envelope(format!(
                    "point ({}, {}) is not finite",
                    time, value
                )));
            }
            env.insert(time, value);
        }
        Ok(env)
    }

    /// Inserts a point, replacing any point at the same time.
    pub fn insert(&mut self, time: f64, value: f64) {
        let idx = self.points.partition_point(|&(t, _)| t < time);
        match self.points.get(idx) {
            Some(&(t, _)) if t == time => self.points[idx] = (time, value),
            _ => self.points.insert(idx, (time, value)),
        }
    }

    /// Points in time order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the envelope has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Envelope for LinearEnvelope {
    fn value_at(&self, time: f64) -> f64 {
        let (Some(&(t0, v0)), Some(&(tn, vn))) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if time <= t0 {
            return v0;
        }
        if time >= tn {
            return vn;
        }
        let idx = self.points.partition_point(|&(t, _)| t <= time);
        let (ta, va) = self.points[idx - 1];
        let (tb, vb) = self.points[idx];
        va + (vb - va) * (time - ta) / (tb - ta)
    }
}

impl TryFrom<Vec<[f64; 2]>> for LinearEnvelope {
    type Error = ModelError;

    fn try_from(points: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::from_points(points.into_iter().map(|[t, v]| (t, v)))
    }
}

impl From<LinearEnvelope> for Vec<[f64; 2]> {
    fn from(env: LinearEnvelope) -> Self {
        env.points.into_iter().map(|(t, v)| [t, v]).collect()
    }
}
