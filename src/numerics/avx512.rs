//! AVX-512 rendition of the kernel, built directly on `core::arch` intrinsics.

use std::arch::x86_64::*;

use crate::numerics::decomposition::{Layout, WIDE_LANES};

/// Squared L2 distance between the `DIM` floats at `a` and the `DIM` floats at `b`.
///
/// Every load is the unaligned form. Partial 8- and 4-lane results are
/// zero-extended before joining the 512-bit accumulator, and the last `DIM % 4`
/// floats come in through one zero-masked load per input, so no lane past `DIM`
/// is ever read.
///
/// # Safety
///
/// - `a` and `b` must each point to at least `DIM` readable floats.
/// - The CPU must support `avx512f` and `avx512vl`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn sq_euclidean<const DIM: usize>(a: *const f32, b: *const f32) -> f32 {
    let mut total = _mm512_setzero_ps();

    for i in 0..Layout::<DIM>::SHAPE.wide_chunks {
        let offset = i * WIDE_LANES;
        let (a_chunk, b_chunk) =
            unsafe { (_mm512_loadu_ps(a.add(offset)), _mm512_loadu_ps(b.add(offset))) };

        let diff = _mm512_sub_ps(a_chunk, b_chunk);
        total = _mm512_add_ps(total, _mm512_mul_ps(diff, diff));
    }

    if Layout::<DIM>::SHAPE.medium {
        let offset = Layout::<DIM>::SHAPE.medium_offset();
        let (a_chunk, b_chunk) =
            unsafe { (_mm256_loadu_ps(a.add(offset)), _mm256_loadu_ps(b.add(offset))) };

        let diff = _mm256_sub_ps(a_chunk, b_chunk);
        total = _mm512_add_ps(total, _mm512_zextps256_ps512(_mm256_mul_ps(diff, diff)));
    }

    if Layout::<DIM>::SHAPE.narrow {
        let offset = Layout::<DIM>::SHAPE.narrow_offset();
        let (a_chunk, b_chunk) =
            unsafe { (_mm_loadu_ps(a.add(offset)), _mm_loadu_ps(b.add(offset))) };

        let diff = _mm_sub_ps(a_chunk, b_chunk);
        total = _mm512_add_ps(total, _mm512_zextps128_ps512(_mm_mul_ps(diff, diff)));
    }

    if Layout::<DIM>::SHAPE.remainder > 0 {
        // bit i set <=> lane i is loaded, the rest come back as 0.0
        let mask: __mmask8 = Layout::<DIM>::SHAPE.remainder_mask();
        let offset = Layout::<DIM>::SHAPE.remainder_offset();
        let (a_chunk, b_chunk) = unsafe {
            (
                _mm_maskz_loadu_ps(mask, a.add(offset)),
                _mm_maskz_loadu_ps(mask, b.add(offset)),
            )
        };

        let diff = _mm_sub_ps(a_chunk, b_chunk);
        total = _mm512_add_ps(total, _mm512_zextps128_ps512(_mm_mul_ps(diff, diff)));
    }

    _mm512_reduce_add_ps(total)
}
