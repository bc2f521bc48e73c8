//! Tests for argument and partial validation.

use super::*;
use crate::error::SynthError;
use bwe_model::{Breakpoint, Partial};

#[test]
fn test_rejects_bad_sample_rate() {
    for sr in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
        let mut buffer = Vec::new();
        let err = Synthesizer::new(sr, &mut buffer).unwrap_err();
        assert_eq!(err.code(), "SYNTH_001");
    }
}

#[test]
fn test_rejects_negative_fade_time() {
    let mut buffer = Vec::new();
    assert!(matches!(
        Synthesizer::with_fade_time(44100.0, &mut buffer, -0.001),
        Err(SynthError::InvalidArgument { .. })
    ));

    let mut synth = Synthesizer::new(44100.0, &mut buffer).unwrap();
    assert!(synth.set_fade_time(-1.0).is_err());
    assert_eq!(synth.fade_time(), DEFAULT_FADE_TIME);
    synth.set_fade_time(0.005).unwrap();
    assert_eq!(synth.fade_time(), 0.005);
}

#[test]
fn test_negative_start_time_leaves_buffer_untouched() {
    let partial = Partial::from_breakpoints(
        0,
        [
            Breakpoint::sinusoid(-0.01, 100.0, 1.0),
            Breakpoint::sinusoid(0.2, 100.0, 1.0),
        ],
    )
    .unwrap();

    let mut buffer = vec![0.5; 10];
    let mut synth = Synthesizer::new(1000.0, &mut buffer).unwrap();
    let err = synth.synthesize(&partial).unwrap_err();
    assert_eq!(err.code(), "SYNTH_002");
    assert_eq!(buffer, vec![0.5; 10]);
}

#[test]
fn test_synthesize_all_checks_before_rendering() {
    let good = Partial::from_breakpoints(
        0,
        [
            Breakpoint::sinusoid(0.0, 100.0, 1.0),
            Breakpoint::sinusoid(0.2, 100.0, 1.0),
        ],
    )
    .unwrap();
    let bad = Partial::from_breakpoints(0, [Breakpoint::sinusoid(-0.5, 100.0, 1.0)]).unwrap();

    let mut buffer = Vec::new();
    let mut synth = Synthesizer::new(1000.0, &mut buffer).unwrap();
    assert!(synth.synthesize_all([&good, &bad]).is_err());
    assert!(buffer.is_empty());
}
