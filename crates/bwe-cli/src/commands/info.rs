//! Info command implementation
//!
//! Summarizes a partials document: counts, labels, and time span.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bwe_model::transform::time_span;
use bwe_model::Partial;
use colored::Colorize;
use serde::Serialize;

use crate::input::load_partials;

/// Summary of a partial collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialsSummary {
    pub partials: usize,
    pub breakpoints: usize,
    /// Number of partials per label.
    pub labels: BTreeMap<i32, usize>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub max_frequency: Option<f64>,
}

impl PartialsSummary {
    pub fn of(partials: &[Partial]) -> Self {
        let mut labels = BTreeMap::new();
        for partial in partials {
            *labels.entry(partial.label()).or_insert(0) += 1;
        }
        let span = time_span(partials);
        let max_frequency = partials
            .iter()
            .flat_map(|p| p.iter().map(|bp| bp.frequency()))
            .fold(None, |max: Option<f64>, f| Some(max.map_or(f, |m| m.max(f))));

        Self {
            partials: partials.len(),
            breakpoints: partials.iter().map(Partial::len).sum(),
            labels,
            start_time: span.map(|(start, _)| start),
            end_time: span.map(|(_, end)| end),
            max_frequency,
        }
    }
}

/// Run the info command
///
/// # Arguments
/// * `partials_path` - Path to the partials document
/// * `json_output` - Whether to output the summary as JSON
pub fn run(partials_path: &str, json_output: bool) -> Result<ExitCode> {
    let doc = load_partials(Path::new(partials_path))
        .with_context(|| format!("Failed to load partials document: {}", partials_path))?;
    let summary = PartialsSummary::of(&doc.partials);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Partials:".cyan().bold(), partials_path);
    println!("  {} {}", "count:".dimmed(), summary.partials);
    println!("  {} {}", "breakpoints:".dimmed(), summary.breakpoints);
    if let (Some(start), Some(end)) = (summary.start_time, summary.end_time) {
        println!("  {} {:.4}s .. {:.4}s", "span:".dimmed(), start, end);
    }
    if let Some(max) = summary.max_frequency {
        println!("  {} {:.1} Hz", "max frequency:".dimmed(), max);
    }
    println!("  {}", "labels:".dimmed());
    for (label, count) in &summary.labels {
        let name = if *label == bwe_morph::UNLABELED {
            "unlabeled".to_string()
        } else {
            label.to_string()
        };
        println!("    {:>10}  {}", name, count);
    }
    Ok(ExitCode::SUCCESS)
}
