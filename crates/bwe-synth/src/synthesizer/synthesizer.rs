//! Partial renderer accumulating into a caller-owned sample buffer.

use std::f64::consts::TAU;
use std::ops::Range;

use bwe_model::transform::time_span;
use bwe_model::{Breakpoint, Partial};
use tracing::{debug, trace};

use crate::error::{SynthError, SynthResult};
use crate::oscillator::Oscillator;

/// Fade time used by [`Synthesizer::new`], in seconds.
pub const DEFAULT_FADE_TIME: f64 = 0.001;

/// Maximum number of samples the oscillator renders per control target.
pub(crate) const CONTROL_BLOCK: usize = 64;

/// Hook applied to every control target's amplitude before it reaches the
/// oscillator.
pub(crate) trait AmplitudeShaper {
    /// Called once before a partial is rendered.
    fn begin_partial(&mut self, partial: &Partial);

    /// Returns the amplitude to use at `time`.
    fn shape(&mut self, time: f64, amplitude: f64) -> f64;
}

/// Leaves amplitudes untouched.
pub(crate) struct Unshaped;

impl AmplitudeShaper for Unshaped {
    fn begin_partial(&mut self, _partial: &Partial) {}

    fn shape(&mut self, _time: f64, amplitude: f64) -> f64 {
        amplitude
    }
}

/// Values the oscillator ramps to, reached at `time`.
#[derive(Debug, Clone, Copy)]
struct Target {
    time: f64,
    frequency: f64,
    amplitude: f64,
    bandwidth: f64,
}

impl Target {
    fn lerp(&self, other: &Target, alpha: f64, time: f64) -> Target {
        Target {
            time,
            frequency: self.frequency + alpha * (other.frequency - self.frequency),
            amplitude: self.amplitude + alpha * (other.amplitude - self.amplitude),
            bandwidth: self.bandwidth + alpha * (other.bandwidth - self.bandwidth),
        }
    }
}

impl From<&Breakpoint> for Target {
    fn from(bp: &Breakpoint) -> Self {
        Target {
            time: bp.time(),
            frequency: bp.frequency(),
            amplitude: bp.amplitude(),
            bandwidth: bp.bandwidth(),
        }
    }
}

/// Renders bandwidth-enhanced partials into a sample buffer.
///
/// The buffer is borrowed, not owned: the client creates it, and several
/// synthesizers may render into it one after another. Rendering always adds
/// to the existing samples. The buffer grows as needed and never shrinks.
///
/// Zero-amplitude breakpoints are inserted a fade time before the start and
/// after the end of each partial to avoid clicks. Partials that start less
/// than one fade time after 0 get a shorter onset fade. No sample whose
/// interpolated frequency is at or above half the sample rate is rendered.
#[derive(Debug)]
pub struct Synthesizer<'a> {
    oscillator: Oscillator,
    buffer: &'a mut Vec<f64>,
    fade_time: f64,
    sample_rate: f64,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer with the default fade time of one millisecond.
    ///
    /// # Errors
    /// `InvalidArgument` if `sample_rate` is not positive.
    pub fn new(sample_rate: f64, buffer: &'a mut Vec<f64>) -> SynthResult<Self> {
        Self::with_fade_time(sample_rate, buffer, DEFAULT_FADE_TIME)
    }

    /// Creates a synthesizer with an explicit fade time.
    ///
    /// # Arguments
    /// * `sample_rate` - Rate in Hz at which samples are rendered (positive)
    /// * `buffer` - Buffer that rendered samples are accumulated into
    /// * `fade_time` - Onset and release fade in seconds (non-negative)
    ///
    /// # Errors
    /// `InvalidArgument` if `sample_rate` is not positive or `fade_time` is
    /// negative.
    pub fn with_fade_time(
        sample_rate: f64,
        buffer: &'a mut Vec<f64>,
        fade_time: f64,
    ) -> SynthResult<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SynthError::invalid_argument(
                "sample_rate",
                format!("must be positive, got {}", sample_rate),
            ));
        }
        check_fade_time(fade_time)?;

        Ok(Self {
            oscillator: Oscillator::new(sample_rate),
            buffer,
            fade_time,
            sample_rate,
        })
    }

    /// Renders one partial into the buffer.
    ///
    /// # Errors
    /// `InvalidPartial` if the partial starts before time 0. The buffer is
    /// untouched in that case.
    pub fn synthesize(&mut self, partial: &Partial) -> SynthResult<()> {
        self.render(partial, &mut Unshaped)
    }

    /// Renders every partial of a collection.
    ///
    /// All start times are checked and the buffer is sized for the whole
    /// collection before anything is rendered.
    ///
    /// # Errors
    /// `InvalidPartial` if any partial starts before time 0. The buffer is
    /// untouched in that case.
    pub fn synthesize_all<'p, I>(&mut self, partials: I) -> SynthResult<()>
    where
        I: IntoIterator<Item = &'p Partial>,
    {
        self.render_all(partials, &mut Unshaped)
    }

    pub(crate) fn render_all<'p, I, S>(&mut self, partials: I, shaper: &mut S) -> SynthResult<()>
    where
        I: IntoIterator<Item = &'p Partial>,
        S: AmplitudeShaper,
    {
        let partials: Vec<&Partial> = partials.into_iter().collect();
        for partial in &partials {
            check_start_time(partial)?;
        }

        if let Some((_, end)) = time_span(partials.iter().copied()) {
            self.reserve_until(end + self.fade_time);
        }

        debug!("synthesizing {} partials", partials.len());
        for partial in partials {
            self.render(partial, shaper)?;
        }
        Ok(())
    }

    pub(crate) fn render<S: AmplitudeShaper>(
        &mut self,
        partial: &Partial,
        shaper: &mut S,
    ) -> SynthResult<()> {
        check_start_time(partial)?;
        let (Some(first), Some(last)) = (partial.first(), partial.last()) else {
            return Ok(());
        };

        let fade_in = Target {
            time: (first.time() - self.fade_time).max(0.0),
            amplitude: 0.0,
            ..Target::from(first)
        };
        let fade_out = Target {
            time: last.time() + self.fade_time,
            amplitude: 0.0,
            ..Target::from(last)
        };
        self.reserve_until(fade_out.time);

        debug!(
            "rendering partial label={} breakpoints={} span={:.4}..{:.4}s",
            partial.label(),
            partial.len(),
            first.time(),
            last.time()
        );

        shaper.begin_partial(partial);

        // Rewind the stored phase to the start of the onset fade.
        let onset = first.time() - fade_in.time;
        let phase = first.phase() - TAU * first.frequency() * onset;
        self.oscillator
            .reset(fade_in.frequency, 0.0, fade_in.bandwidth, phase);

        let mut from = fade_in;
        for to in partial
            .iter()
            .map(Target::from)
            .chain(std::iter::once(fade_out))
        {
            self.render_span(&from, &to, shaper);
            from = to;
        }
        Ok(())
    }

    /// Drives the oscillator from one target to the next in control blocks.
    fn render_span<S: AmplitudeShaper>(&mut self, from: &Target, to: &Target, shaper: &mut S) {
        let nyquist = 0.5 * self.sample_rate;
        let start = self.sample_index(from.time);
        let end = self.sample_index(to.time);

        if end <= start {
            trace!("span {:.6}..{:.6}s shorter than one sample", from.time, to.time);
            let (f, a, bw) = control_values(to, nyquist, shaper);
            self.oscillator.generate(&mut [], f, a, bw);
            return;
        }

        let span = (end - start) as f64;
        let mut block_start = start;
        while block_start < end {
            let block_end = (block_start + CONTROL_BLOCK).min(end);
            let target = if block_end == end {
                *to
            } else {
                let alpha = (block_end - start) as f64 / span;
                from.lerp(to, alpha, block_end as f64 / self.sample_rate)
            };
            let (f, a, bw) = control_values(&target, nyquist, shaper);
            if self.oscillator.frequency() < nyquist && f < nyquist {
                self.oscillator
                    .generate(&mut self.buffer[block_start..block_end], f, a, bw);
            } else {
                self.generate_below_nyquist(block_start..block_end, f, a, bw, nyquist);
            }
            block_start = block_end;
        }
    }

    /// Renders a control block whose frequency ramp reaches Nyquist, keeping
    /// only the samples below it. The oscillator still runs over the whole
    /// block so its phase and noise state stay in step.
    fn generate_below_nyquist(
        &mut self,
        range: Range<usize>,
        frequency: f64,
        amplitude: f64,
        bandwidth: f64,
        nyquist: f64,
    ) {
        let count = range.len();
        let f0 = self.oscillator.frequency();
        // Same per-sample ramp as Oscillator::generate.
        let df = (frequency - f0) * (1.0 / count as f64);

        let mut scratch = [0.0; CONTROL_BLOCK];
        self.oscillator
            .generate(&mut scratch[..count], frequency, amplitude, bandwidth);

        for (n, (out, &s)) in self.buffer[range].iter_mut().zip(&scratch[..count]).enumerate() {
            if f0 + df * (n as f64) < nyquist {
                *out += s;
            }
        }
    }

    fn sample_index(&self, time: f64) -> usize {
        (time * self.sample_rate).round() as usize
    }

    /// Grows the buffer with zeros so that the sample at `time` exists.
    fn reserve_until(&mut self, time: f64) {
        let needed = self.sample_index(time) + 1;
        if self.buffer.len() < needed {
            self.buffer.resize(needed, 0.0);
        }
    }

    /// Partial fade time in seconds.
    pub fn fade_time(&self) -> f64 {
        self.fade_time
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The sample buffer used (not owned) by this synthesizer.
    pub fn samples(&self) -> &[f64] {
        self.buffer
    }

    /// Mutable access to the sample buffer.
    pub fn samples_mut(&mut self) -> &mut Vec<f64> {
        self.buffer
    }

    /// Sets the fade time in seconds.
    ///
    /// # Errors
    /// `InvalidArgument` if `fade_time` is negative.
    pub fn set_fade_time(&mut self, fade_time: f64) -> SynthResult<()> {
        check_fade_time(fade_time)?;
        self.fade_time = fade_time;
        Ok(())
    }
}

/// Applies the shaper to a control target, silencing targets at or above
/// Nyquist.
fn control_values<S: AmplitudeShaper>(
    target: &Target,
    nyquist: f64,
    shaper: &mut S,
) -> (f64, f64, f64) {
    let amplitude = if target.frequency >= nyquist {
        0.0
    } else {
        shaper.shape(target.time, target.amplitude)
    };
    (target.frequency, amplitude, target.bandwidth)
}

fn check_fade_time(fade_time: f64) -> SynthResult<()> {
    if !fade_time.is_finite() || fade_time < 0.0 {
        return Err(SynthError::invalid_argument(
            "fade_time",
            format!("must be non-negative, got {}", fade_time),
        ));
    }
    Ok(())
}

fn check_start_time(partial: &Partial) -> SynthResult<()> {
    if partial.start_time() < 0.0 {
        return Err(SynthError::invalid_partial(format!(
            "partial (label {}) starts at negative time {}",
            partial.label(),
            partial.start_time()
        )));
    }
    Ok(())
}
