//! CLI commands run end to end against documents on disk.

use std::process::ExitCode;

use bwe_cli::commands::{info, morph, render, validate};
use bwe_cli::input::load_partials;
use bwe_model::Partial;
use bwe_tests::{constant_partial, ProjectFixture};
use pretty_assertions::assert_eq;

fn source_a() -> Vec<Partial> {
    vec![
        constant_partial(1, 0.0, 0.5, 220.0, 0.4, 0.1),
        constant_partial(2, 0.1, 0.4, 440.0, 0.2, 0.0),
    ]
}

fn source_b() -> Vec<Partial> {
    vec![
        constant_partial(1, 0.0, 0.6, 330.0, 0.2, 0.3),
        constant_partial(3, 0.2, 0.5, 990.0, 0.1, 0.0),
    ]
}

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_morph_then_render() {
    let fixture = ProjectFixture::new();
    fixture.add_partials("a.json", &source_a());
    fixture.add_partials("b.json", &source_b());
    let morph_spec = fixture.add_json(
        "morph.json",
        r#"{"source_a": "a.json", "source_b": "b.json", "function": [[0.0, 0.5]]}"#,
    );
    let morphed_path = fixture.file("morphed.json");

    let code = morph::run(path_str(&morph_spec), path_str(&morphed_path)).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let morphed = load_partials(&morphed_path).unwrap().partials;
    // Label 1 corresponds; labels 2 and 3 are crossfaded and unlabeled.
    let mut labels: Vec<i32> = morphed.iter().map(Partial::label).collect();
    labels.sort();
    assert_eq!(labels, vec![0, 0, 1]);
    let corresponding = morphed.iter().find(|p| p.label() == 1).unwrap();
    assert!((corresponding.frequency_at(0.0) - 275.0).abs() < 1e-9);
    assert!((corresponding.amplitude_at(0.0) - 0.3).abs() < 1e-9);

    let render_spec = fixture.add_json(
        "render.json",
        &format!(
            r#"{{"sample_rate": 22050, "partials": {}}}"#,
            serde_json::to_string(&morphed).unwrap()
        ),
    );
    assert_eq!(
        validate::run(path_str(&render_spec), "render", false).unwrap(),
        ExitCode::SUCCESS
    );

    let wav_path = fixture.file("out.wav");
    let code = render::run(path_str(&render_spec), path_str(&wav_path)).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let reader = hound::WavReader::open(&wav_path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22050);
    assert_eq!(spec.bits_per_sample, 32);
    let samples: Vec<f32> = reader.into_samples::<f32>().map(Result::unwrap).collect();
    // round((0.6 + 0.001) * 22050) + 1
    assert_eq!(samples.len(), 13253);
    assert!(samples.iter().any(|s| s.abs() > 0.05));
}

#[test]
fn test_morph_reports_missing_weights() {
    let fixture = ProjectFixture::new();
    fixture.add_partials("a.json", &source_a());
    fixture.add_partials("b.json", &source_b());
    let morph_spec = fixture.add_json(
        "morph.json",
        r#"{"source_a": "a.json", "source_b": "b.json", "frequency": [[0.0, 0.5]]}"#,
    );
    let output = fixture.file("morphed.json");

    let code = morph::run(path_str(&morph_spec), path_str(&output)).unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!output.exists());
}

#[test]
fn test_morph_fails_on_missing_source() {
    let fixture = ProjectFixture::new();
    fixture.add_partials("a.json", &source_a());
    let morph_spec = fixture.add_json(
        "morph.json",
        r#"{"source_a": "a.json", "source_b": "missing.json", "function": [[0.0, 1.0]]}"#,
    );
    let output = fixture.file("morphed.json");
    assert!(morph::run(path_str(&morph_spec), path_str(&output)).is_err());
}

#[test]
fn test_validate_and_info_on_partials_document() {
    let fixture = ProjectFixture::new();
    let path = fixture.add_partials("a.json", &source_a());

    assert_eq!(
        validate::run(path_str(&path), "partials", true).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(info::run(path_str(&path), true).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_validate_rejects_negative_start() {
    let fixture = ProjectFixture::new();
    let path = fixture.add_json(
        "render.json",
        r#"{"sample_rate": 44100, "partials": [
            {"label": 1, "breakpoints": [
                {"time": -0.5, "frequency": 100.0, "amplitude": 0.1},
                {"time": 0.5, "frequency": 100.0, "amplitude": 0.1}
            ]}
        ]}"#,
    );
    assert_eq!(
        validate::run(path_str(&path), "render", false).unwrap(),
        ExitCode::from(1)
    );

    let wav_path = fixture.file("out.wav");
    assert_eq!(
        render::run(path_str(&path), path_str(&wav_path)).unwrap(),
        ExitCode::from(1)
    );
    assert!(!wav_path.exists());
}
