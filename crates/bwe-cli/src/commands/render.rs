//! Render command implementation
//!
//! Synthesizes the partials of a render document into a mono WAV file.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use bwe_model::transform::{clamp_bandwidth, suppress_low_frequency_noise, time_span};
use bwe_model::Partial;
use bwe_synth::buffer::{normalize, peak};
use bwe_synth::JitterySynthesizer;
use colored::Colorize;
use tracing::info;

use super::reporting;
use crate::input::{load_render_spec, RenderSpec};

/// Run the render command
///
/// # Arguments
/// * `spec_path` - Path to the render document
/// * `output_path` - Path of the WAV file to write
///
/// # Returns
/// Exit code: 0 on success, 1 if the document is invalid
pub fn run(spec_path: &str, output_path: &str) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Rendering:".cyan().bold(), spec_path);

    let spec = load_render_spec(Path::new(spec_path))
        .with_context(|| format!("Failed to load render document: {}", spec_path))?;

    let problems = spec.validate();
    if !problems.is_empty() {
        reporting::print_invalid(&problems);
        return Ok(ExitCode::from(1));
    }

    let samples = render_samples(&spec)?;
    write_wav(Path::new(output_path), &samples, spec.sample_rate as u32)?;

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "{} {} partials, {} samples, peak {:.3}",
        "Rendered:".dimmed(),
        spec.partials.len(),
        samples.len(),
        peak(&samples)
    );
    println!(
        "\n{} Wrote {} ({}ms)",
        "SUCCESS".green().bold(),
        output_path,
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

/// Renders a validated document to samples.
///
/// Bandwidths are clamped to [0, 1] and, if the document sets a low
/// frequency cutoff, removed below it before synthesis.
pub fn render_samples(spec: &RenderSpec) -> Result<Vec<f64>> {
    let partials: Vec<Partial> = spec
        .partials
        .iter()
        .map(|p| {
            let clamped = clamp_bandwidth(p);
            match spec.low_frequency_cutoff {
                Some(cutoff) => suppress_low_frequency_noise(&clamped, cutoff),
                None => clamped,
            }
        })
        .collect();

    if let Some((begin, end)) = time_span(&partials) {
        info!(
            "rendering {} partials spanning {:.3}..{:.3}s at {} Hz",
            partials.len(),
            begin,
            end,
            spec.sample_rate
        );
    }

    let mut buffer = Vec::new();
    {
        let mut synth =
            JitterySynthesizer::with_fade_time(spec.sample_rate, &mut buffer, spec.fade_time)
                .context("Failed to create synthesizer")?
                .with_seed(spec.seed);
        if let Some(jitter) = &spec.jitter {
            synth.configure_jitter(
                Arc::new(jitter.gain.clone()),
                Arc::new(jitter.coherence.clone()),
                jitter.coherence_cutoff,
            );
        }
        synth
            .synthesize_all(&partials)
            .context("Failed to synthesize partials")?;
    }

    if let Some(headroom_db) = spec.headroom_db {
        normalize(&mut buffer, headroom_db);
    }
    Ok(buffer)
}

/// Writes mono 32-bit float WAV.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    let wav_spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, wav_spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;
    for &sample in samples {
        writer
            .write_sample(sample as f32)
            .context("Failed to write WAV sample")?;
    }
    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}
