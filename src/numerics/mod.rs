//! SIMD squared-distance kernel for fixed-dimension `f32` vectors.
//!
//! The dimension is a const generic. Each instantiation is cut at compile time
//! into 16-, 8- and 4-lane chunks plus a masked tail (see [`Decomposition`]),
//! and all partial sums land in one 16-lane accumulator before the final
//! horizontal sum.
//!
//! # Backends
//!
//! [`sq_euclidean`] picks its backend at compile time, see [`ACTIVE_BACKEND`]:
//!
//! - [`avx512`] when the build enables `avx512f` and `avx512vl`, e.g.
//!   `RUSTFLAGS="-C target-feature=+avx512f,+avx512vl" cargo build --release`
//!   or `-C target-cpu=native` on an AVX-512 machine.
//! - [`portable`] (`std::simd`) otherwise, which is what a plain `cargo build` gives.
//!
//! There is no runtime detection: a binary built for AVX-512 faults on CPUs without it.

mod decomposition;
mod kernel;
pub mod portable;
pub mod reference;

#[cfg(target_arch = "x86_64")]
pub mod avx512;

#[cfg(test)]
mod testing;

use serde::Serialize;

pub use decomposition::{Decomposition, Layout, MEDIUM_LANES, NARROW_LANES, WIDE_LANES};
pub use kernel::{FixedVector, sq_euclidean, sq_euclidean_arrays, try_sq_euclidean};

pub const SIMD_LANECOUNT: usize = WIDE_LANES;

/// Instruction set a build of [`sq_euclidean`] runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Avx512,
    PortableSimd,
}

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512vl"
))]
pub const ACTIVE_BACKEND: Backend = Backend::Avx512;

#[cfg(not(all(
    target_arch = "x86_64",
    target_feature = "avx512f",
    target_feature = "avx512vl"
)))]
pub const ACTIVE_BACKEND: Backend = Backend::PortableSimd;

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Avx512 => "avx512",
            Backend::PortableSimd => "portable_simd",
        }
    }
}
