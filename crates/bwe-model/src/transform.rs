//! Pure envelope transforms over partials, plus collection helpers.
//!
//! Each transform takes a partial by reference and returns a new one with the
//! same label; the input is never modified.

use crate::breakpoint::Breakpoint;
use crate::envelope::Envelope;
use crate::partial::Partial;

/// Applies `f` to every breakpoint. Breakpoint times may change; the result is
/// re-sorted.
pub fn map_breakpoints<F>(partial: &Partial, mut f: F) -> Partial
where
    F: FnMut(&Breakpoint) -> Breakpoint,
{
    let mut out = Partial::with_label(partial.label());
    for bp in partial {
        out.insert(f(bp));
    }
    out
}

/// Clamps every bandwidth into [0, 1].
pub fn clamp_bandwidth(partial: &Partial) -> Partial {
    map_breakpoints(partial, |bp| bp.with_bandwidth(bp.bandwidth().min(1.0)))
}

/// Removes the noise component from breakpoints below `cutoff` Hz.
///
/// Bandwidth-enhanced synthesis sounds rough on low partials. Amplitude is
/// total energy in this model, so dropping the bandwidth moves all of it into
/// the sinusoid without changing the amplitude.
pub fn suppress_low_frequency_noise(partial: &Partial, cutoff: f64) -> Partial {
    map_breakpoints(partial, |bp| {
        if bp.frequency() < cutoff {
            bp.with_bandwidth(0.0)
        } else {
            *bp
        }
    })
}

/// Multiplies each breakpoint amplitude by `gain` evaluated at its time.
pub fn scale_amplitude(partial: &Partial, gain: &dyn Envelope) -> Partial {
    map_breakpoints(partial, |bp| {
        bp.with_amplitude(bp.amplitude() * gain.value_at(bp.time()))
    })
}

/// Earliest start and latest end time over non-empty partials.
///
/// Returns `None` when no partial has breakpoints.
pub fn time_span<'a, I>(partials: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a Partial>,
{
    partials
        .into_iter()
        .filter(|p| !p.is_empty())
        .fold(None, |span, p| match span {
            None => Some((p.start_time(), p.end_time())),
            Some((start, end)) => Some((start.min(p.start_time()), end.max(p.end_time()))),
        })
}
