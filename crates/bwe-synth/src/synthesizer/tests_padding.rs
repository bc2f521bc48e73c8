//! Tests for the zero-amplitude fades around each partial.

use super::*;
use bwe_model::{Breakpoint, Partial};
use std::f64::consts::FRAC_PI_2;

const SAMPLE_RATE: f64 = 1000.0;
const FADE: f64 = 0.01;

/// 1 Hz sinusoid at its peak, amplitude 1, from `start` to `end`.
fn slow_partial(start: f64, end: f64) -> Partial {
    Partial::from_breakpoints(
        1,
        [
            Breakpoint::new(start, 1.0, 1.0, 0.0, FRAC_PI_2),
            Breakpoint::new(end, 1.0, 1.0, 0.0, FRAC_PI_2 + std::f64::consts::TAU * (end - start)),
        ],
    )
    .unwrap()
}

fn render(partial: &Partial) -> Vec<f64> {
    let mut buffer = Vec::new();
    let mut synth = Synthesizer::with_fade_time(SAMPLE_RATE, &mut buffer, FADE).unwrap();
    synth.synthesize(partial).unwrap();
    buffer
}

#[test]
fn test_fade_endpoints_are_silent() {
    let out = render(&slow_partial(0.1, 0.2));

    assert_eq!(out.len(), 211);
    assert_eq!(out[90], 0.0);
    assert_eq!(out[210], 0.0);
    assert!(out[..90].iter().all(|&s| s == 0.0));
}

#[test]
fn test_partial_reaches_full_amplitude_at_first_breakpoint() {
    let out = render(&slow_partial(0.1, 0.2));

    // Phase at the first breakpoint is exactly the stored phase.
    assert!((out[100] - 1.0).abs() < 1e-9, "got {}", out[100]);
}

#[test]
fn test_onset_and_release_ramps_are_monotone() {
    let out = render(&slow_partial(0.1, 0.2));

    for n in 90..100 {
        assert!(out[n + 1] > out[n], "onset not rising at {}", n);
    }
    for n in 200..210 {
        assert!(out[n + 1] < out[n], "release not falling at {}", n);
    }
}

#[test]
fn test_onset_shortened_near_time_zero() {
    let out = render(&slow_partial(0.005, 0.05));

    assert_eq!(out[0], 0.0);
    assert!((out[5] - 1.0).abs() < 1e-9);
    assert!(out[1] > 0.0 && out[1] < out[2]);
}

#[test]
fn test_zero_fade_time_ends_at_last_breakpoint() {
    let partial = slow_partial(0.1, 0.2);
    let mut buffer = Vec::new();
    let mut synth = Synthesizer::with_fade_time(SAMPLE_RATE, &mut buffer, 0.0).unwrap();
    synth.synthesize(&partial).unwrap();

    assert_eq!(buffer.len(), 201);
    assert!(buffer[..100].iter().all(|&s| s == 0.0));
    assert_eq!(buffer[200], 0.0);
}

#[test]
fn test_nothing_rendered_at_or_above_nyquist() {
    for freq in [500.0, 600.0] {
        let partial = Partial::from_breakpoints(
            0,
            [
                Breakpoint::sinusoid(0.1, freq, 1.0),
                Breakpoint::sinusoid(0.2, freq, 1.0),
            ],
        )
        .unwrap();
        let out = render(&partial);
        assert!(out.iter().all(|&s| s == 0.0), "{} Hz leaked", freq);
    }
}

#[test]
fn test_samples_crossing_nyquist_are_silent() {
    let sample_rate = 44100.0;
    let nyquist = 0.5 * sample_rate;
    let partial = Partial::from_breakpoints(
        0,
        [
            Breakpoint::sinusoid(0.1, 21000.0, 1.0),
            Breakpoint::sinusoid(0.2, 23100.0, 1.0),
        ],
    )
    .unwrap();

    let mut buffer = Vec::new();
    let mut synth = Synthesizer::new(sample_rate, &mut buffer).unwrap();
    synth.synthesize(&partial).unwrap();

    // The ramp climbs about 0.48 Hz per sample; allow one sample of slack
    // at the crossing.
    let mut audible = 0;
    for (n, &s) in buffer.iter().enumerate() {
        let f = partial.frequency_at(n as f64 / sample_rate);
        if f >= nyquist + 1.0 {
            assert_eq!(s, 0.0, "sample {} at {:.1} Hz leaked", n, f);
        } else if f < nyquist - 1.0 && s.abs() > 0.1 {
            audible += 1;
        }
    }
    assert!(audible > 1000, "only {} audible samples below nyquist", audible);
}
