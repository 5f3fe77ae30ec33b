use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::{debug, info};

use crate::error::{KernelError, Result};

/// `(rows, dim)` of a row-major 2-d array.
fn matrix_shape<R: Read>(npy: &npyz::NpyFile<R>) -> Result<(usize, usize)> {
    if matches!(npy.order(), npyz::Order::Fortran) {
        return Err(KernelError::ColumnMajor);
    }
    match *npy.shape() {
        [rows, dim] => Ok((rows as usize, dim as usize)),
        _ => Err(KernelError::Shape(npy.shape().to_vec())),
    }
}

/// Reads only the header of a `(rows, dim)` `.npy` file and returns `dim`.
///
/// The harness uses this to pick the kernel instantiation before loading.
pub fn peek_npy_dim(path: impl AsRef<Path>) -> Result<usize> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let npy = npyz::NpyFile::new(reader)?;
    let (_, dim) = matrix_shape(&npy)?;
    Ok(dim)
}

/// Decodes a 2-d little-endian `f32` `.npy` array whose rows are `DIM` long.
///
/// # Errors
///
/// - [`KernelError::Io`] if the bytes are not a valid `f32` npy file
/// - [`KernelError::Shape`] if the array is not 2-d
/// - [`KernelError::ColumnMajor`] if the file is stored in Fortran order
/// - [`KernelError::DimensionMismatch`] if rows are not `DIM` long
///
/// `DIM == 0` does not compile:
///
/// ```compile_fail
/// let _ = l2kernel::fs::parse_vectors_npy::<0>(&[]);
/// ```
pub fn parse_vectors_npy<const DIM: usize>(bytes: &[u8]) -> Result<Vec<[f32; DIM]>> {
    const { assert!(DIM > 0, "vectors need at least one dimension") };

    let npy = npyz::NpyFile::new(bytes)?;
    let (rows, dim) = matrix_shape(&npy)?;
    if dim != DIM {
        return Err(KernelError::DimensionMismatch {
            expected: DIM,
            actual: dim,
        });
    }

    let flat = npy.into_vec::<f32>()?;
    let (vectors, rest) = flat.as_chunks::<DIM>();
    debug_assert!(rest.is_empty());
    debug!(rows, dim, "decoded npy matrix");

    Ok(vectors.to_vec())
}

pub fn load_vectors_npy<const DIM: usize>(path: impl AsRef<Path>) -> Result<Vec<[f32; DIM]>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let vectors = parse_vectors_npy::<DIM>(&bytes)?;
    info!(path = %path.display(), rows = vectors.len(), dim = DIM, "loaded vectors");
    Ok(vectors)
}
