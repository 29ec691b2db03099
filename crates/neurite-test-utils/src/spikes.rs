//! Spike-train extraction and comparison.

/// Times of upward threshold crossings in a sampled voltage trace.
///
/// `voltage[k]` is the sample at `t = k·dt`. Crossing times are linearly
/// interpolated between the bracketing samples, which is what makes
/// convergence sweeps meaningful at coarse `dt`.
pub fn find_spikes(voltage: &[f64], threshold: f64, dt: f64) -> Vec<f64> {
    let mut spikes = Vec::new();
    for k in 1..voltage.len() {
        let (v0, v1) = (voltage[k - 1], voltage[k]);
        if v0 < threshold && v1 >= threshold {
            let frac = (threshold - v0) / (v1 - v0);
            spikes.push(((k - 1) as f64 + frac) * dt);
        }
    }
    spikes
}

/// Error summary between a measured spike train and a reference train.
#[derive(Clone, Debug, PartialEq)]
pub struct SpikeComparison {
    /// Largest `|measured − reference| / reference` over paired spikes;
    /// infinite if the trains have different lengths.
    pub max_relative_error: f64,
    /// Root-mean-square absolute spike-time difference [ms].
    pub rms: f64,
    /// Largest absolute spike-time difference [ms].
    pub max: f64,
    /// Number of spike pairs compared.
    pub matched: usize,
}

/// Compare spike trains pairwise in order.
///
/// Trains of different lengths report an infinite relative error: a missing
/// or spurious spike is a worse failure than any timing offset.
pub fn compare_spikes(measured: &[f64], reference: &[f64]) -> SpikeComparison {
    let matched = measured.len().min(reference.len());
    let mut max_relative_error: f64 = 0.0;
    let mut max: f64 = 0.0;
    let mut sum_sq = 0.0;

    for (m, r) in measured.iter().zip(reference.iter()) {
        let diff = (m - r).abs();
        max = max.max(diff);
        sum_sq += diff * diff;
        if *r != 0.0 {
            max_relative_error = max_relative_error.max(diff / r.abs());
        }
    }
    if measured.len() != reference.len() {
        max_relative_error = f64::INFINITY;
    }

    SpikeComparison {
        max_relative_error,
        rms: if matched > 0 {
            (sum_sq / matched as f64).sqrt()
        } else {
            0.0
        },
        max,
        matched,
    }
}
