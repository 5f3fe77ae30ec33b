//! Error type shared by the checked entry points, the loader and the harness.
//!
//! The kernel itself never produces one of these: it trusts its inputs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    /// A slice handed to a checked entry point holds fewer floats than the kernel reads.
    #[error("buffer holds {actual} floats, kernel reads {expected}")]
    ShortBuffer { expected: usize, actual: usize },

    /// Stored vectors do not have the dimension the kernel was instantiated for.
    #[error("stored vectors have dimension {actual}, kernel was built for {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vector files must hold a 2-d `(rows, dim)` array.
    #[error("expected a 2-d array, found shape {0:?}")]
    Shape(Vec<u64>),

    /// Vectors are read row by row, column-major files would come out transposed.
    #[error("column-major (fortran_order) arrays are not supported")]
    ColumnMajor,

    /// No kernel instantiation exists for this dimension.
    #[error("no kernel compiled for dimension {0}")]
    UnsupportedDimension(usize),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KernelError>;
