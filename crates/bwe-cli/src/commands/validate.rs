//! Validate command implementation
//!
//! Checks a render, morph, or partials document without using it.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::reporting;
use crate::input::{load_json, MorphSpec, PartialsDocument, RenderSpec};

/// Machine-readable validation result.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub kind: String,
    pub errors: Vec<String>,
}

/// Run the validate command
///
/// # Arguments
/// * `spec_path` - Path to the document
/// * `kind` - Document kind (render, morph, or partials)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid or unreadable
pub fn run(spec_path: &str, kind: &str, json_output: bool) -> Result<ExitCode> {
    if !json_output {
        println!("{} {} ({})", "Validating:".cyan().bold(), spec_path, kind);
    }

    let errors = match check(Path::new(spec_path), kind) {
        Ok(problems) => problems,
        Err(e) => vec![format!("{:#}", e)],
    };

    if json_output {
        let output = ValidateOutput {
            success: errors.is_empty(),
            kind: kind.to_string(),
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    if errors.is_empty() {
        println!("\n{} Document is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        reporting::print_invalid(&errors);
        Ok(ExitCode::from(1))
    }
}

/// Loads a document of the given kind and returns its problems.
pub fn check(path: &Path, kind: &str) -> Result<Vec<String>> {
    match kind {
        "render" => Ok(load_json::<RenderSpec>(path)?.validate()),
        "morph" => Ok(load_json::<MorphSpec>(path)?.validate()),
        "partials" => Ok(load_json::<PartialsDocument>(path)?.validate()),
        other => anyhow::bail!(
            "unknown document kind: {} (expected render, morph, or partials)",
            other
        ),
    }
}
