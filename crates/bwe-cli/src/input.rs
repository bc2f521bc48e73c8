//! JSON documents read and written by the CLI.
//!
//! Three document kinds exist:
//! - [`RenderSpec`]: partials plus synthesis settings, rendered to WAV
//! - [`MorphSpec`]: two partial files plus morph weight envelopes
//! - [`PartialsDocument`]: a bare partial collection
//!
//! Every document has a `validate()` method returning the list of problems
//! found; an empty list means the document can be used.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bwe_model::{LinearEnvelope, Partial};
use bwe_synth::DEFAULT_FADE_TIME;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn default_fade_time() -> f64 {
    DEFAULT_FADE_TIME
}

/// Synthesis request: partials and how to render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSpec {
    /// Output sample rate in Hz.
    pub sample_rate: f64,
    /// Onset and release fade in seconds.
    #[serde(default = "default_fade_time")]
    pub fade_time: f64,
    /// Jitter seed.
    #[serde(default)]
    pub seed: u32,
    /// Optional amplitude jitter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter: Option<JitterSpec>,
    /// Breakpoints below this frequency (Hz) are rendered without noise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_frequency_cutoff: Option<f64>,
    /// Normalize the output peak to this level in dBFS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headroom_db: Option<f64>,
    /// Partials to render.
    pub partials: Vec<Partial>,
}

/// Jitter settings of a [`RenderSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JitterSpec {
    /// Jitter depth over time.
    pub gain: LinearEnvelope,
    /// Share of the common jitter signal over time.
    pub coherence: LinearEnvelope,
    /// Highest label taking part in the common jitter signal.
    pub coherence_cutoff: i32,
}

/// Morph request: two partial files and the weight envelopes.
///
/// Source paths are relative to the directory of the morph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MorphSpec {
    /// Partials document morphed from (weight 0).
    pub source_a: PathBuf,
    /// Partials document morphed to (weight 1).
    pub source_b: PathBuf,
    /// Shared weight, used for any parameter without its own envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<LinearEnvelope>,
    /// Frequency weight over time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<LinearEnvelope>,
    /// Amplitude weight over time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<LinearEnvelope>,
    /// Bandwidth weight over time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<LinearEnvelope>,
}

/// Frequency, amplitude, and bandwidth weights resolved from a [`MorphSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct MorphWeights {
    pub frequency: LinearEnvelope,
    pub amplitude: LinearEnvelope,
    pub bandwidth: LinearEnvelope,
}

/// A bare collection of partials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialsDocument {
    pub partials: Vec<Partial>,
}

impl RenderSpec {
    /// Returns every problem that would prevent rendering.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            problems.push(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            ));
        } else if self.sample_rate.fract() != 0.0 || self.sample_rate > u32::MAX as f64 {
            problems.push(format!(
                "sample_rate must be a whole number of Hz, got {}",
                self.sample_rate
            ));
        }
        if !self.fade_time.is_finite() || self.fade_time < 0.0 {
            problems.push(format!(
                "fade_time must be non-negative, got {}",
                self.fade_time
            ));
        }
        if let Some(cutoff) = self.low_frequency_cutoff {
            if !cutoff.is_finite() || cutoff < 0.0 {
                problems.push(format!(
                    "low_frequency_cutoff must be non-negative, got {}",
                    cutoff
                ));
            }
        }
        if let Some(headroom) = self.headroom_db {
            if !headroom.is_finite() || headroom > 0.0 {
                problems.push(format!(
                    "headroom_db must be at most 0 dBFS, got {}",
                    headroom
                ));
            }
        }

        problems.extend(partial_problems(&self.partials));
        for (i, partial) in self.partials.iter().enumerate() {
            if !partial.is_empty() && partial.start_time() < 0.0 {
                problems.push(format!(
                    "partials[{}] starts at negative time {}",
                    i,
                    partial.start_time()
                ));
            }
        }
        problems
    }
}

impl MorphSpec {
    /// Returns every problem that would prevent morphing.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (name, envelope) in [
            ("frequency", &self.frequency),
            ("amplitude", &self.amplitude),
            ("bandwidth", &self.bandwidth),
        ] {
            if envelope.is_none() && self.function.is_none() {
                problems.push(format!(
                    "no {} weight: set '{}' or the shared 'function'",
                    name, name
                ));
            }
        }
        if self.source_a.as_os_str().is_empty() {
            problems.push("source_a must not be empty".to_string());
        }
        if self.source_b.as_os_str().is_empty() {
            problems.push("source_b must not be empty".to_string());
        }
        problems
    }

    /// Resolves the three weights, falling back to the shared function.
    ///
    /// Returns `None` if a weight has neither its own envelope nor a shared
    /// one.
    pub fn weights(&self) -> Option<MorphWeights> {
        let pick = |own: &Option<LinearEnvelope>| own.as_ref().or(self.function.as_ref()).cloned();
        Some(MorphWeights {
            frequency: pick(&self.frequency)?,
            amplitude: pick(&self.amplitude)?,
            bandwidth: pick(&self.bandwidth)?,
        })
    }

    /// Source paths resolved against the directory containing the document.
    pub fn source_paths(&self, spec_path: &Path) -> (PathBuf, PathBuf) {
        let base = spec_path.parent().unwrap_or_else(|| Path::new(""));
        (base.join(&self.source_a), base.join(&self.source_b))
    }
}

impl PartialsDocument {
    /// Returns every malformed breakpoint in the collection.
    pub fn validate(&self) -> Vec<String> {
        partial_problems(&self.partials)
    }
}

fn partial_problems(partials: &[Partial]) -> Vec<String> {
    let mut problems = Vec::new();
    for (i, partial) in partials.iter().enumerate() {
        for (j, bp) in partial.iter().enumerate() {
            if let Err(e) = bp.validate() {
                problems.push(format!("partials[{}].breakpoints[{}]: {}", i, j, e));
            }
        }
    }
    problems
}

/// Reads and parses a JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON document: {}", path.display()))
}

/// Writes a document as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize document")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

pub fn load_render_spec(path: &Path) -> Result<RenderSpec> {
    load_json(path)
}

pub fn load_morph_spec(path: &Path) -> Result<MorphSpec> {
    load_json(path)
}

pub fn load_partials(path: &Path) -> Result<PartialsDocument> {
    load_json(path)
}
