//! Determinism checks for rendered sample buffers.

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First sample index that differed, with the run it differed in.
    pub first_difference: Option<(usize, usize)>,
}

impl DeterminismResult {
    /// Panics with the first difference if the output was not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some((run, index)) = self.first_difference {
            panic!(
                "output of run {} differs from run 0 at sample {} (reference hash {})",
                run, index, self.hash
            );
        }
    }
}

/// Little-endian bytes of the samples, for hashing.
pub fn samples_to_bytes(samples: &[f64]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// BLAKE3 hash as a hex string.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `generate_fn` `runs` times and compares every output to the first.
pub fn verify_determinism<F>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<f64>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let hash = compute_hash(&samples_to_bytes(&reference));

    for run in 1..runs {
        let output = generate_fn();
        let mismatch = reference
            .iter()
            .zip(&output)
            .position(|(a, b)| a.to_bits() != b.to_bits())
            .or_else(|| (reference.len() != output.len()).then(|| reference.len().min(output.len())));
        if let Some(index) = mismatch {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash,
                first_difference: Some((run, index)),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash,
        first_difference: None,
    }
}
