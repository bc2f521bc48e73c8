//! Synthesizer extension adding label-grouped random amplitude jitter.
//!
//! Each control target's amplitude is multiplied by `max(0, 1 + gain(t) * j)`
//! where `j` mixes a signal shared by all partials with one private to each
//! partial. Partials labeled at or below the coherence cutoff mix in the
//! shared signal according to `coherence(t)`; partials above it only get the
//! private signal.

use std::sync::Arc;

use bwe_model::{Envelope, Partial};
use tracing::debug;

use crate::error::SynthResult;
use crate::rng::{derive_stream_key, stream_value};
use crate::synthesizer::{AmplitudeShaper, Synthesizer};

/// Length of one jitter control frame in seconds.
pub const JITTER_FRAME: f64 = 0.01;

/// Stream key of the signal shared by all partials.
const SHARED_STREAM: u64 = 0;

/// Jitter configuration.
#[derive(Clone)]
struct Jitter {
    gain: Arc<dyn Envelope>,
    coherence: Arc<dyn Envelope>,
    coherence_cutoff: i32,
}

/// A [`Synthesizer`] whose amplitudes are randomly perturbed.
///
/// Randomness is fully determined by the seed and by each partial's label and
/// breakpoints, so rendering is reproducible and independent of the order in
/// which partials are synthesized.
pub struct JitterySynthesizer<'a> {
    synth: Synthesizer<'a>,
    jitter: Option<Jitter>,
    seed: u32,
}

impl<'a> JitterySynthesizer<'a> {
    /// Creates a jittery synthesizer with the default fade time and seed 0.
    ///
    /// # Errors
    /// `InvalidArgument` if `sample_rate` is not positive.
    pub fn new(sample_rate: f64, buffer: &'a mut Vec<f64>) -> SynthResult<Self> {
        Ok(Self::from_synthesizer(Synthesizer::new(sample_rate, buffer)?))
    }

    /// Creates a jittery synthesizer with an explicit fade time.
    ///
    /// # Errors
    /// `InvalidArgument` if `sample_rate` is not positive or `fade_time` is
    /// negative.
    pub fn with_fade_time(
        sample_rate: f64,
        buffer: &'a mut Vec<f64>,
        fade_time: f64,
    ) -> SynthResult<Self> {
        Ok(Self::from_synthesizer(Synthesizer::with_fade_time(
            sample_rate,
            buffer,
            fade_time,
        )?))
    }

    /// Wraps an existing synthesizer. Jitter starts unconfigured.
    pub fn from_synthesizer(synth: Synthesizer<'a>) -> Self {
        Self {
            synth,
            jitter: None,
            seed: 0,
        }
    }

    /// Sets the jitter seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Enables jitter.
    ///
    /// # Arguments
    /// * `gain` - Jitter depth over time (0 disables)
    /// * `coherence` - Share of the common signal over time, clamped to [0, 1]
    /// * `coherence_cutoff` - Highest label that takes part in the common signal
    pub fn configure_jitter(
        &mut self,
        gain: Arc<dyn Envelope>,
        coherence: Arc<dyn Envelope>,
        coherence_cutoff: i32,
    ) {
        self.jitter = Some(Jitter {
            gain,
            coherence,
            coherence_cutoff,
        });
    }

    /// Disables jitter; rendering becomes identical to a plain synthesizer.
    pub fn clear_jitter(&mut self) {
        self.jitter = None;
    }

    /// Returns true if jitter is configured.
    pub fn is_jittery(&self) -> bool {
        self.jitter.is_some()
    }

    /// Jitter seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Renders one partial. See [`Synthesizer::synthesize`].
    pub fn synthesize(&mut self, partial: &Partial) -> SynthResult<()> {
        match &self.jitter {
            Some(jitter) => {
                let mut shaper = JitterShaper::new(jitter, self.seed);
                self.synth.render(partial, &mut shaper)
            }
            None => self.synth.synthesize(partial),
        }
    }

    /// Renders a collection. See [`Synthesizer::synthesize_all`].
    pub fn synthesize_all<'p, I>(&mut self, partials: I) -> SynthResult<()>
    where
        I: IntoIterator<Item = &'p Partial>,
    {
        match &self.jitter {
            Some(jitter) => {
                debug!(
                    "jitter enabled: seed={} coherence_cutoff={}",
                    self.seed, jitter.coherence_cutoff
                );
                let mut shaper = JitterShaper::new(jitter, self.seed);
                self.synth.render_all(partials, &mut shaper)
            }
            None => self.synth.synthesize_all(partials),
        }
    }

    /// The wrapped synthesizer.
    pub fn synthesizer(&self) -> &Synthesizer<'a> {
        &self.synth
    }

    /// Mutable access to the wrapped synthesizer.
    pub fn synthesizer_mut(&mut self) -> &mut Synthesizer<'a> {
        &mut self.synth
    }

    /// The sample buffer.
    pub fn samples(&self) -> &[f64] {
        self.synth.samples()
    }
}

/// Applies jitter to one partial at a time.
struct JitterShaper<'j> {
    jitter: &'j Jitter,
    seed: u32,
    coherent: bool,
    stream: u64,
}

impl<'j> JitterShaper<'j> {
    fn new(jitter: &'j Jitter, seed: u32) -> Self {
        Self {
            jitter,
            seed,
            coherent: false,
            stream: SHARED_STREAM,
        }
    }

    /// Smooth random signal in [-1, 1], linear between frame values.
    fn signal(&self, stream: u64, time: f64) -> f64 {
        let position = time / JITTER_FRAME;
        let frame = position.floor();
        let frac = position - frame;
        let index = frame as i64;
        let v0 = stream_value(self.seed, stream, index);
        let v1 = stream_value(self.seed, stream, index + 1);
        v0 + frac * (v1 - v0)
    }
}

/// Stream key of a partial's private jitter, derived from its label and every
/// breakpoint so that distinct partials never share a stream.
fn private_stream(partial: &Partial) -> u64 {
    let mut bytes = Vec::with_capacity(4 + partial.len() * 40);
    bytes.extend_from_slice(&partial.label().to_le_bytes());
    for bp in partial {
        for value in [
            bp.time(),
            bp.frequency(),
            bp.amplitude(),
            bp.bandwidth(),
            bp.phase(),
        ] {
            bytes.extend_from_slice(&value.to_bits().to_le_bytes());
        }
    }
    derive_stream_key(&[&bytes])
}

impl AmplitudeShaper for JitterShaper<'_> {
    fn begin_partial(&mut self, partial: &Partial) {
        self.coherent = partial.label() <= self.jitter.coherence_cutoff;
        self.stream = private_stream(partial);
    }

    fn shape(&mut self, time: f64, amplitude: f64) -> f64 {
        if amplitude == 0.0 {
            return 0.0;
        }
        let gain = self.jitter.gain.value_at(time);
        if gain == 0.0 {
            return amplitude;
        }

        let coherence = if self.coherent {
            self.jitter.coherence.value_at(time).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let shared = self.signal(SHARED_STREAM, time);
        let private = self.signal(self.stream, time);
        let j = coherence * shared + (1.0 - coherence) * private;

        amplitude * (1.0 + gain * j).max(0.0)
    }
}
