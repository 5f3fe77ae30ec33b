//! Vector buffers the harness and benches feed to the kernel.

mod generator;

pub use generator::Workload;
