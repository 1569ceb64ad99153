//! Vector primitives shared by charge synthesis and crystallization.
//!
//! # Numerical Conventions
//!
//! - Dot products and norms accumulate in `f64` and are narrowed to `f32`.
//! - Cosine similarity against a zero-magnitude or non-finite vector is `NaN`.
//!   Callers treat `NaN` as "no candidate" rather than as an error.
//! - [`argmax_first`] breaks ties by first occurrence, so walks over the same
//!   table are reproducible regardless of how many entries share a score.

/// Cosine similarity between two vectors of equal length.
///
/// Returns `NaN` when either vector has zero magnitude or contains a
/// non-finite component.
///
/// # Example
///
/// ```
/// use intent_oracle_core::similarity::cosine_similarity;
///
/// let a = [1.0, 0.0, 0.0];
/// let b = [0.0, 1.0, 0.0];
/// assert!(cosine_similarity(&a, &b).abs() < 1e-6);
/// assert!(cosine_similarity(&a, &[0.0, 0.0, 0.0]).is_nan());
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "cosine_similarity on mismatched lengths");

    let mut dot = 0.0f64;
    let mut mag_a = 0.0f64;
    let mut mag_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = x as f64;
        let y = y as f64;
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 || !denom.is_finite() || !dot.is_finite() {
        return f32::NAN;
    }

    (dot / denom) as f32
}

/// Euclidean (L2) norm.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter()
        .map(|&x| (x as f64) * (x as f64))
        .sum::<f64>()
        .sqrt() as f32
}

/// Normalize `v` in place to unit length.
///
/// Returns `false` and leaves `v` untouched when its norm is exactly zero.
pub fn l2_normalize(v: &mut [f32]) -> bool {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

/// True when every component is exactly zero (or the slice is empty).
pub fn is_zero(v: &[f32]) -> bool {
    v.iter().all(|&x| x == 0.0)
}

/// Mean of absolute component values; zero for an empty slice.
pub fn mean_abs(v: &[f32]) -> f32 {
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().map(|&x| (x as f64).abs()).sum();
    (sum / v.len() as f64) as f32
}

/// Index of the largest non-`NaN` value, first occurrence on ties.
///
/// Returns `None` when the slice is empty or every value is `NaN`.
pub fn argmax_first(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            // strict `>` keeps the earliest index on ties
            Some((_, b)) if v > b => best = Some((i, v)),
            None => best = Some((i, v)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let a = vec![0.3, -0.4, 0.5];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_scale_invariant() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![10.0, 20.0, 30.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_is_nan() {
        let a = vec![1.0, 0.0];
        assert!(cosine_similarity(&a, &[0.0, 0.0]).is_nan());
        assert!(cosine_similarity(&a, &[f32::NAN, 1.0]).is_nan());
        assert!(cosine_similarity(&a, &[f32::INFINITY, 1.0]).is_nan());
    }

    #[test]
    fn test_normalize_unit_length() {
        let mut v = vec![3.0, 4.0];
        assert!(l2_normalize(&mut v));
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_untouched() {
        let mut v = vec![0.0, 0.0, 0.0];
        assert!(!l2_normalize(&mut v));
        assert!(is_zero(&v));
    }

    #[test]
    fn test_mean_abs() {
        assert!((mean_abs(&[1.0, -1.0, 0.5, -0.5]) - 0.75).abs() < 1e-6);
        assert_eq!(mean_abs(&[]), 0.0);
    }

    #[test]
    fn test_argmax_first_occurrence_on_ties() {
        assert_eq!(argmax_first(&[0.2, 0.9, 0.9, 0.1]), Some(1));
        assert_eq!(argmax_first(&[0.5, 0.5, 0.5]), Some(0));
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax_first(&[f32::NAN, 0.1, f32::NAN, 0.3]), Some(3));
        assert_eq!(argmax_first(&[f32::NAN, f32::NAN]), None);
        assert_eq!(argmax_first(&[]), None);
    }

    #[test]
    fn test_argmax_negative_values() {
        assert_eq!(argmax_first(&[-0.9, -0.1, -0.5]), Some(1));
    }
}
