/// Squared L2 distance summed strictly left to right, one float at a time.
///
/// This is the ground truth the vector kernels are checked against. It makes no
/// attempt to be fast.
///
/// # Panics
///
/// Panics if the two vectors have different lengths
pub fn sq_euclidean_scalar(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len());

    let mut total = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        let d = x - y;
        total += d * d;
    }
    total
}

/// Largest gap accepted between a lane-grouped result and the scalar reference.
///
/// Every summand is non-negative, so the rounding error of any summation order
/// stays under `dim * eps * reference` (plus one rounding per product).
pub fn tolerance(dim: usize, reference: f32) -> f32 {
    2.0 * dim as f32 * f32::EPSILON * reference.max(f32::MIN_POSITIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_small_example() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [0.0; 5];
        assert_eq!(sq_euclidean_scalar(&a, &b), 55.0);
    }

    #[test]
    fn test_scalar_empty_is_zero() {
        assert_eq!(sq_euclidean_scalar(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_scalar_length_mismatch_panics() {
        sq_euclidean_scalar(&[1.0, 2.0], &[1.0]);
    }
}
