//! Fixtures shared by the kernel test modules.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

/// Every shape the plan can take for small dimensions: no tail stage, each
/// tail stage alone, and their combinations.
macro_rules! for_boundary_dims {
    ($check:ident) => {
        $check::<1>();
        $check::<2>();
        $check::<3>();
        $check::<4>();
        $check::<5>();
        $check::<7>();
        $check::<8>();
        $check::<9>();
        $check::<12>();
        $check::<15>();
        $check::<16>();
        $check::<17>();
        $check::<31>();
        $check::<32>();
        $check::<33>();
        $check::<100>();
        $check::<768>();
    };
}

pub(crate) use for_boundary_dims;

pub fn gaussian_array<const DIM: usize>(seed: u64) -> [f32; DIM] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = [0.0; DIM];
    for x in out.iter_mut() {
        *x = rng.sample(StandardNormal);
    }
    out
}

pub const SCRATCH_LEN: usize = 1024;

/// 64-byte aligned storage, so that `base + k` floats is misaligned for any `k % 16 != 0`.
/// Slots not written by [`Scratch::place`] hold NaN.
#[repr(align(64))]
pub struct Scratch(pub [f32; SCRATCH_LEN]);

impl Scratch {
    pub fn new() -> Self {
        Scratch([f32::NAN; SCRATCH_LEN])
    }

    /// Copies `v` to `offset` floats past the aligned base and returns the copy.
    pub fn place<const DIM: usize>(&mut self, offset: usize, v: &[f32; DIM]) -> &[f32; DIM] {
        let slot = &mut self.0[offset..offset + DIM];
        slot.copy_from_slice(v);
        self.0[offset..].first_chunk::<DIM>().unwrap()
    }
}
