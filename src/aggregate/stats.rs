//! Summary Statistics
//!
//! Small helpers over score slices. Median of an even-length slice is the
//! mean of the two middle values; standard deviation is the population
//! form, 0.0 for fewer than two values.

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(scores: &[u32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
}

/// Median, 0.0 for an empty slice
pub fn median(scores: &[u32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Population standard deviation, 0.0 for fewer than two values
pub fn std_dev(scores: &[u32]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let avg = mean(scores);
    let variance = scores
        .iter()
        .map(|&s| {
            let diff = s as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / scores.len() as f64;
    variance.sqrt()
}
