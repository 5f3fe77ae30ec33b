use crate::error::{KernelError, Result};

/// Squared L2 distance between the `DIM` floats behind `a` and behind `b`.
///
/// ```text
/// L2^2(x, y) = Σ_i (x[i] - y[i]) ** 2
/// ```
///
/// Lanes are summed in groups rather than left to right, so the result may
/// differ from a scalar loop in the last bits. It is exactly symmetric in
/// `a` and `b`.
///
/// Builds with `avx512f` and `avx512vl` enabled run the AVX-512 kernel, other
/// builds run the `std::simd` one. The choice is made at compile time.
///
/// # Safety
///
/// `a` and `b` must each point to at least `DIM` readable floats. Alignment
/// beyond that of `f32` is not required.
#[inline]
pub unsafe fn sq_euclidean<const DIM: usize>(a: *const f32, b: *const f32) -> f32 {
    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512vl"
    ))]
    {
        unsafe { super::avx512::sq_euclidean::<DIM>(a, b) }
    }

    #[cfg(not(all(
        target_arch = "x86_64",
        target_feature = "avx512f",
        target_feature = "avx512vl"
    )))]
    {
        let (a, b) = unsafe { (&*a.cast::<[f32; DIM]>(), &*b.cast::<[f32; DIM]>()) };
        super::portable::sq_euclidean::<DIM>(a, b)
    }
}

/// Safe form of [`sq_euclidean`]: the array types guarantee `DIM` floats on both sides.
#[inline]
pub fn sq_euclidean_arrays<const DIM: usize>(a: &[f32; DIM], b: &[f32; DIM]) -> f32 {
    unsafe { sq_euclidean::<DIM>(a.as_ptr(), b.as_ptr()) }
}

/// Checked form of [`sq_euclidean`] for slices of unknown length.
///
/// Reads the first `DIM` floats of each slice, anything after them is ignored.
///
/// # Errors
///
/// [`KernelError::ShortBuffer`] if either slice holds fewer than `DIM` floats.
pub fn try_sq_euclidean<const DIM: usize>(a: &[f32], b: &[f32]) -> Result<f32> {
    Ok(sq_euclidean_arrays(prefix::<DIM>(a)?, prefix::<DIM>(b)?))
}

fn prefix<const DIM: usize>(v: &[f32]) -> Result<&[f32; DIM]> {
    v.first_chunk::<DIM>().ok_or(KernelError::ShortBuffer {
        expected: DIM,
        actual: v.len(),
    })
}

/// Fixed-size vectors the kernel can measure. The trait exists because inherent
/// methods cannot be added to `[f32; DIM]`.
pub trait FixedVector {
    fn l2_squared(&self, othr: &Self) -> f32;
    fn l2(&self, othr: &Self) -> f32;
}

impl<const DIM: usize> FixedVector for [f32; DIM] {
    /// # Usage
    /// Computes the **SQUARED** L2 distance between two vectors.
    ///
    /// This is typically useful when comparing two distances :
    ///
    /// dist(u,v) < dist(w, x) ⇔ dist(u,v) ** 2 < dist(w,x) ** 2
    ///
    /// and the right side skips a square root.
    #[inline]
    fn l2_squared(&self, othr: &Self) -> f32 {
        sq_euclidean_arrays(self, othr)
    }

    #[inline]
    fn l2(&self, othr: &Self) -> f32 {
        self.l2_squared(othr).sqrt()
    }
}
