//! Loading stored vectors from disk.
//!
//! Vectors come as NumPy `(rows, dim)` `f32` matrices, the format the rest of
//! the vector search tooling already produces.

mod vectors_load;

pub use vectors_load::*;
