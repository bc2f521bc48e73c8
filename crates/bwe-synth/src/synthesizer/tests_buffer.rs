//! Tests for buffer growth and accumulation.

use super::*;
use bwe_model::{Breakpoint, Partial};

fn partial(label: i32, start: f64, end: f64, freq: f64, bandwidth: f64) -> Partial {
    Partial::from_breakpoints(
        label,
        [
            Breakpoint::new(start, freq, 0.5, bandwidth, 0.0),
            Breakpoint::new(end, freq * 1.1, 0.3, bandwidth, 0.0),
        ],
    )
    .unwrap()
}

#[test]
fn test_new_uses_default_fade() {
    let mut buffer = Vec::new();
    let synth = Synthesizer::new(44100.0, &mut buffer).unwrap();
    assert_eq!(synth.fade_time(), DEFAULT_FADE_TIME);
    assert_eq!(synth.sample_rate(), 44100.0);
    assert!(synth.samples().is_empty());
}

#[test]
fn test_buffer_grows_to_cover_release() {
    let mut buffer = Vec::new();
    let mut synth = Synthesizer::with_fade_time(1000.0, &mut buffer, 0.01).unwrap();
    synth.synthesize(&partial(0, 0.1, 0.5, 100.0, 0.0)).unwrap();
    assert_eq!(synth.samples().len(), 511);
}

#[test]
fn test_buffer_never_shrinks() {
    let mut buffer = vec![0.0; 2000];
    let mut synth = Synthesizer::with_fade_time(1000.0, &mut buffer, 0.01).unwrap();
    synth.synthesize(&partial(0, 0.1, 0.5, 100.0, 0.0)).unwrap();
    assert_eq!(buffer.len(), 2000);
}

#[test]
fn test_existing_samples_outside_partial_untouched() {
    let mut buffer = vec![0.25; 50];
    let mut synth = Synthesizer::with_fade_time(1000.0, &mut buffer, 0.01).unwrap();
    synth.synthesize(&partial(0, 0.1, 0.5, 100.0, 0.0)).unwrap();

    assert!(buffer[..50].iter().all(|&s| s == 0.25));
    assert!(buffer[50..90].iter().all(|&s| s == 0.0));
}

#[test]
fn test_rendering_accumulates() {
    let p = partial(3, 0.0, 0.3, 220.0, 0.4);

    let mut once = Vec::new();
    Synthesizer::new(8000.0, &mut once)
        .unwrap()
        .synthesize(&p)
        .unwrap();

    let mut twice = Vec::new();
    let mut synth = Synthesizer::new(8000.0, &mut twice).unwrap();
    synth.synthesize(&p).unwrap();
    synth.synthesize(&p).unwrap();

    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(&twice) {
        assert!((2.0 * a - b).abs() < 1e-12);
    }
}

#[test]
fn test_synthesize_all_is_order_independent() {
    let a = partial(1, 0.0, 0.2, 300.0, 0.5);
    let b = partial(2, 0.05, 0.3, 450.0, 0.2);

    let mut forward = Vec::new();
    Synthesizer::new(8000.0, &mut forward)
        .unwrap()
        .synthesize_all([&a, &b])
        .unwrap();

    let mut backward = Vec::new();
    Synthesizer::new(8000.0, &mut backward)
        .unwrap()
        .synthesize_all(vec![&b, &a])
        .unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_synthesize_all_presizes_buffer() {
    let partials = vec![
        partial(1, 0.0, 0.2, 300.0, 0.0),
        partial(2, 0.1, 0.7, 300.0, 0.0),
    ];
    let mut buffer = Vec::new();
    let mut synth = Synthesizer::with_fade_time(1000.0, &mut buffer, 0.01).unwrap();
    synth.synthesize_all(&partials).unwrap();
    assert_eq!(buffer.len(), 711);
}

#[test]
fn test_empty_partial_renders_nothing() {
    let mut buffer = Vec::new();
    let mut synth = Synthesizer::new(1000.0, &mut buffer).unwrap();
    synth.synthesize(&Partial::new()).unwrap();
    synth.synthesize_all(std::iter::empty()).unwrap();
    assert!(buffer.is_empty());
}
