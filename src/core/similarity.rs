/// Cosine similarity between two questionnaire answer vectors
///
/// # Arguments
/// * `a` - Answers of the first participant
/// * `b` - Answers of the second participant
///
/// # Returns
/// Similarity in [-1, 1]; 0 when either vector is empty or all zeros.
/// Only the common prefix is compared if the lengths differ.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }

    let (a, b) = (&a[..len], &b[..len]);
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Round a score for display
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
