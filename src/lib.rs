#![feature(portable_simd)]
#![cfg_attr(
    target_arch = "x86_64",
    feature(stdarch_x86_avx512, avx512_target_feature)
)]

pub mod error;
pub mod fs;
pub mod numerics;
pub mod statistics;
pub mod workload;
