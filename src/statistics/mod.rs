//! Accuracy counters collected while the harness exercises the kernel.

mod stats;

pub use stats::Stats;
