use std::simd::{Simd, num::SimdFloat};

use crate::numerics::decomposition::{Layout, MEDIUM_LANES, NARROW_LANES, WIDE_LANES};

type Wide = Simd<f32, WIDE_LANES>;
type Medium = Simd<f32, MEDIUM_LANES>;
type Narrow = Simd<f32, NARROW_LANES>;

/// Squared L2 distance written against `std::simd`.
///
/// ```text
/// L2^2(x, y) = Σ_i (x[i] - y[i]) ** 2
/// ```
///
/// Same plan as the AVX-512 kernel: full 16-lane chunks, then at most one
/// 8-lane and one 4-lane chunk, then a masked load for the last 0..=3 floats.
/// Narrower results are zero-extended into the single 16-lane accumulator.
/// `from_slice` never assumes alignment.
#[inline]
pub fn sq_euclidean<const DIM: usize>(a: &[f32; DIM], b: &[f32; DIM]) -> f32 {
    let mut total = Wide::splat(0.0);

    for i in 0..Layout::<DIM>::SHAPE.wide_chunks {
        let offset = i * WIDE_LANES;
        let diff = Wide::from_slice(&a[offset..]) - Wide::from_slice(&b[offset..]);
        total += diff * diff;
    }

    if Layout::<DIM>::SHAPE.medium {
        let offset = Layout::<DIM>::SHAPE.medium_offset();
        let diff = Medium::from_slice(&a[offset..]) - Medium::from_slice(&b[offset..]);
        total += (diff * diff).resize::<WIDE_LANES>(0.0);
    }

    if Layout::<DIM>::SHAPE.narrow {
        let offset = Layout::<DIM>::SHAPE.narrow_offset();
        let diff = Narrow::from_slice(&a[offset..]) - Narrow::from_slice(&b[offset..]);
        total += (diff * diff).resize::<WIDE_LANES>(0.0);
    }

    if Layout::<DIM>::SHAPE.remainder > 0 {
        // the tail slice is exactly `remainder` long, missing lanes load as 0.0
        let offset = Layout::<DIM>::SHAPE.remainder_offset();
        let diff = Narrow::load_or_default(&a[offset..]) - Narrow::load_or_default(&b[offset..]);
        total += (diff * diff).resize::<WIDE_LANES>(0.0);
    }

    total.reduce_sum()
}
