//! Latency reductions over a finished run.

/// Number of equal-frequency partitions used for the tail estimate.
pub const TAIL_PARTITIONS: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencyStats {
    pub avg: f64,
    pub median: f64,
    pub p95: f64,
}

impl LatencyStats {
    /// All-zero stats when `samples` is empty.
    pub fn from_samples(mut samples: Vec<f64>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        samples.sort_by(f64::total_cmp);

        Self {
            avg: mean(&samples).unwrap_or(0.0),
            median: median(&samples).unwrap_or(0.0),
            p95: quantiles(&samples, TAIL_PARTITIONS)
                .last()
                .copied()
                .unwrap_or(0.0),
        }
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Middle value of `sorted`, or the mean of the two middle values.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// The `n - 1` cut points dividing `sorted` into `n` equal-frequency intervals.
///
/// Positions are interpolated over `len + 1` ranks ("exclusive" method), so with few samples
/// the outer cut points may extrapolate beyond the observed range. A single sample yields
/// that sample for every cut point.
pub fn quantiles(sorted: &[f64], n: usize) -> Vec<f64> {
    let len = sorted.len();
    if n < 2 || len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![sorted[0]; n - 1];
    }

    let m = len + 1;
    (1..n)
        .map(|i| {
            let j = (i * m / n).clamp(1, len - 1);
            // i*m - j*n may be negative once j is clamped down.
            let delta = (i * m) as f64 - (j * n) as f64;
            let n = n as f64;
            (sorted[j - 1] * (n - delta) + sorted[j] * delta) / n
        })
        .collect()
}
