//! Test fixture utilities: synthetic partials and document trees on disk.

use std::path::{Path, PathBuf};

use bwe_cli::input::{write_json, PartialsDocument};
use bwe_model::{Breakpoint, Partial};
use tempfile::TempDir;

/// A partial with constant frequency, amplitude, and bandwidth.
pub fn constant_partial(
    label: i32,
    start: f64,
    end: f64,
    frequency: f64,
    amplitude: f64,
    bandwidth: f64,
) -> Partial {
    Partial::from_breakpoints(
        label,
        [
            Breakpoint::new(start, frequency, amplitude, bandwidth, 0.0),
            Breakpoint::new(end, frequency, amplitude, bandwidth, 0.0),
        ],
    )
    .expect("constant partial breakpoints are valid")
}

/// Mean of the squared samples.
pub fn mean_square(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
}

/// A temporary directory holding documents for CLI tests.
pub struct ProjectFixture {
    pub root: TempDir,
}

impl ProjectFixture {
    /// Create a new empty fixture directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of a file inside the fixture.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Writes a partials document and returns its path.
    pub fn add_partials(&self, name: &str, partials: &[Partial]) -> PathBuf {
        let path = self.file(name);
        let doc = PartialsDocument {
            partials: partials.to_vec(),
        };
        write_json(&path, &doc).expect("Failed to write partials document");
        path
    }

    /// Writes raw JSON text and returns its path.
    pub fn add_json(&self, name: &str, json: &str) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, json).expect("Failed to write JSON document");
        path
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
