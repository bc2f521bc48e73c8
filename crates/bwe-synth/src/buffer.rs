//! Sample buffer helpers.
//!
//! A [`Synthesizer`](crate::Synthesizer) borrows one buffer exclusively. To
//! render on several threads, give each thread its own buffer and sum them
//! afterwards with [`mix_into`].

/// Adds `src` into `dest`, growing `dest` with zeros if `src` is longer.
pub fn mix_into(dest: &mut Vec<f64>, src: &[f64]) {
    if dest.len() < src.len() {
        dest.resize(src.len(), 0.0);
    }
    for (d, s) in dest.iter_mut().zip(src) {
        *d += s;
    }
}

/// Largest absolute sample value, 0 for an empty buffer.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, |a, b| a.max(b))
}

/// Scales samples so that the peak sits `headroom_db` below 0 dBFS.
///
/// # Arguments
/// * `samples` - Audio samples to normalize
/// * `headroom_db` - Headroom in dB below 0 dBFS (e.g., -3.0 for -3dB headroom)
pub fn normalize(samples: &mut [f64], headroom_db: f64) {
    let target_peak = 10.0_f64.powf(headroom_db / 20.0);
    let current_peak = peak(samples);

    if current_peak > 0.0 {
        let gain = target_peak / current_peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }
}
