//! Morph command implementation
//!
//! Morphs the partial files named by a morph document and writes the result
//! as a partials document.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use bwe_model::Partial;
use bwe_morph::morph_collections;
use colored::Colorize;

use super::reporting;
use crate::input::{load_morph_spec, load_partials, write_json, MorphWeights, PartialsDocument};

/// Run the morph command
///
/// # Arguments
/// * `spec_path` - Path to the morph document
/// * `output_path` - Path of the partials document to write
///
/// # Returns
/// Exit code: 0 on success, 1 if a document is invalid
pub fn run(spec_path: &str, output_path: &str) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Morphing:".cyan().bold(), spec_path);

    let spec_file = Path::new(spec_path);
    let spec = load_morph_spec(spec_file)
        .with_context(|| format!("Failed to load morph document: {}", spec_path))?;

    let problems = spec.validate();
    let weights = match spec.weights() {
        Some(weights) if problems.is_empty() => weights,
        _ => {
            reporting::print_invalid(&problems);
            return Ok(ExitCode::from(1));
        }
    };

    let (path_a, path_b) = spec.source_paths(spec_file);
    let mut sources = Vec::with_capacity(2);
    for path in [&path_a, &path_b] {
        let doc = load_partials(path)?;
        let problems = doc.validate();
        if !problems.is_empty() {
            println!("{} {}", "Invalid source:".red().bold(), path.display());
            reporting::print_invalid(&problems);
            return Ok(ExitCode::from(1));
        }
        println!(
            "{} {} ({} partials)",
            "Source:".dimmed(),
            path.display(),
            doc.partials.len()
        );
        sources.push(doc.partials);
    }

    let partials = morph_partials(&sources[0], &sources[1], &weights);
    let count = partials.len();
    write_json(Path::new(output_path), &PartialsDocument { partials })?;

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "\n{} Wrote {} partials to {} ({}ms)",
        "SUCCESS".green().bold(),
        count,
        output_path,
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

/// Morphs two collections under resolved document weights.
pub fn morph_partials(a: &[Partial], b: &[Partial], weights: &MorphWeights) -> Vec<Partial> {
    morph_collections(
        a,
        b,
        Arc::new(weights.frequency.clone()),
        Arc::new(weights.amplitude.clone()),
        Arc::new(weights.bandwidth.clone()),
    )
}
