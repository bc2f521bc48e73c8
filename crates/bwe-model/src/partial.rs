//! Partial: a labeled, time-ordered sequence of breakpoints.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::error::ModelResult;

/// A single time-varying sinusoidal-plus-noise track.
///
/// Breakpoints are kept in strictly increasing time order. Inserting a
/// breakpoint at a time that is already present replaces the old one.
/// Label 0 means unlabeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialFields")]
pub struct Partial {
    label: i32,
    breakpoints: Vec<Breakpoint>,
}

#[derive(Deserialize)]
struct PartialFields {
    #[serde(default)]
    label: i32,
    #[serde(default)]
    breakpoints: Vec<Breakpoint>,
}

impl From<PartialFields> for Partial {
    fn from(fields: PartialFields) -> Self {
        let mut partial = Partial::with_label(fields.label);
        for bp in fields.breakpoints {
            partial.insert(bp);
        }
        partial
    }
}

/// Where a time falls relative to a partial's breakpoints.
enum Position {
    Before,
    At(usize),
    Between(usize, usize),
    After,
}

impl Partial {
    /// Creates an empty, unlabeled partial.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty partial with a label.
    pub fn with_label(label: i32) -> Self {
        Self {
            label,
            breakpoints: Vec::new(),
        }
    }

    /// Builds a partial from breakpoints in any order, validating each one.
    pub fn from_breakpoints<I>(label: i32, breakpoints: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = Breakpoint>,
    {
        let mut partial = Self::with_label(label);
        for bp in breakpoints {
            bp.validate()?;
            partial.insert(bp);
        }
        Ok(partial)
    }

    /// Inserts a breakpoint, keeping time order. Replaces a breakpoint at the same time.
    pub fn insert(&mut self, breakpoint: Breakpoint) {
        let idx = self
            .breakpoints
            .partition_point(|bp| bp.time() < breakpoint.time());
        match self.breakpoints.get(idx) {
            Some(existing) if existing.time() == breakpoint.time() => {
                self.breakpoints[idx] = breakpoint;
            }
            _ => self.breakpoints.insert(idx, breakpoint),
        }
    }

    /// Correspondence label (0 = unlabeled).
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Sets the correspondence label.
    pub fn set_label(&mut self, label: i32) {
        self.label = label;
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns true if the partial has no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Breakpoints in time order.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Iterates over breakpoints in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint> {
        self.breakpoints.iter()
    }

    /// First breakpoint, if any.
    pub fn first(&self) -> Option<&Breakpoint> {
        self.breakpoints.first()
    }

    /// Last breakpoint, if any.
    pub fn last(&self) -> Option<&Breakpoint> {
        self.breakpoints.last()
    }

    /// Time of the first breakpoint (0 for an empty partial).
    pub fn start_time(&self) -> f64 {
        self.first().map_or(0.0, Breakpoint::time)
    }

    /// Time of the last breakpoint (0 for an empty partial).
    pub fn end_time(&self) -> f64 {
        self.last().map_or(0.0, Breakpoint::time)
    }

    /// Duration of the partial in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    fn locate(&self, time: f64) -> Position {
        let idx = self.breakpoints.partition_point(|bp| bp.time() <= time);
        if idx == 0 {
            return Position::Before;
        }
        if self.breakpoints[idx - 1].time() == time {
            return Position::At(idx - 1);
        }
        if idx == self.breakpoints.len() {
            return Position::After;
        }
        Position::Between(idx - 1, idx)
    }

    /// Linear interpolation of a breakpoint parameter, holding boundary values
    /// outside the span.
    fn interpolate(&self, time: f64, param: impl Fn(&Breakpoint) -> f64) -> f64 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0.0;
        };
        match self.locate(time) {
            Position::Before => param(first),
            Position::After => param(last),
            Position::At(i) => param(&self.breakpoints[i]),
            Position::Between(lo, hi) => {
                let (a, b) = (&self.breakpoints[lo], &self.breakpoints[hi]);
                let alpha = (time - a.time()) / (b.time() - a.time());
                param(a) + alpha * (param(b) - param(a))
            }
        }
    }

    /// Frequency in Hz at `time`. Holds the boundary value outside the span.
    pub fn frequency_at(&self, time: f64) -> f64 {
        self.interpolate(time, Breakpoint::frequency)
    }

    /// Amplitude at `time`. Zero outside the span.
    pub fn amplitude_at(&self, time: f64) -> f64 {
        if self.is_empty() || time < self.start_time() || time > self.end_time() {
            return 0.0;
        }
        self.interpolate(time, Breakpoint::amplitude)
    }

    /// Bandwidth at `time`. Holds the boundary value outside the span.
    pub fn bandwidth_at(&self, time: f64) -> f64 {
        self.interpolate(time, Breakpoint::bandwidth)
    }

    /// Phase in radians at `time`.
    ///
    /// Exact at breakpoint times; elsewhere the phase is integrated from the
    /// nearest earlier breakpoint (or back from the first one) using the mean
    /// frequency over the interval.
    pub fn phase_at(&self, time: f64) -> f64 {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0.0;
        };
        let phase = match self.locate(time) {
            Position::At(i) => return self.breakpoints[i].phase(),
            Position::Before => first.phase() - TAU * first.frequency() * (first.time() - time),
            Position::After => last.phase() + TAU * last.frequency() * (time - last.time()),
            Position::Between(lo, _) => {
                let bp = &self.breakpoints[lo];
                let mean_freq = 0.5 * (bp.frequency() + self.frequency_at(time));
                bp.phase() + TAU * mean_freq * (time - bp.time())
            }
        };
        phase.rem_euclid(TAU)
    }
}

impl<'a> IntoIterator for &'a Partial {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
