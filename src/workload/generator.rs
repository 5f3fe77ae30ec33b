use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

/// `count` vectors of `DIM` floats packed back to back in one allocation.
///
/// The first vector starts `offset` floats into the buffer. With `offset = 1`
/// and `DIM % 4 == 0`, no vector starts on a 16-byte boundary, which keeps the
/// kernel honest about unaligned loads.
pub struct Workload<const DIM: usize> {
    data: Vec<f32>,
    offset: usize,
    count: usize,
}

impl<const DIM: usize> Workload<DIM> {
    /// Creates a deterministic workload of standard normal entries.
    /// The same seed produces the same vectors.
    pub fn gaussian(count: usize, offset: usize, seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);

        let mut data = vec![0.0; offset];
        data.extend(rng.sample_iter::<f32, _>(StandardNormal).take(count * DIM));

        Workload {
            data,
            offset,
            count,
        }
    }

    pub fn from_vectors(vectors: &[[f32; DIM]], offset: usize) -> Self {
        let mut data = Vec::with_capacity(offset + vectors.len() * DIM);
        data.resize(offset, 0.0);
        for v in vectors {
            data.extend_from_slice(v);
        }

        Workload {
            data,
            offset,
            count: vectors.len(),
        }
    }

    /// # Panics
    ///
    /// Panics if `i >= self.len()`
    pub fn vector(&self, i: usize) -> &[f32; DIM] {
        assert!(i < self.count, "vector {i} out of {}", self.count);
        let start = self.offset + i * DIM;
        self.data[start..]
            .first_chunk::<DIM>()
            .expect("workload buffer shorter than its vector count")
    }

    pub fn as_ptr(&self, i: usize) -> *const f32 {
        self.vector(i).as_ptr()
    }

    /// Endpoints of pair `i`: each vector is measured against its successor,
    /// the last one against the first.
    pub fn pair(&self, i: usize) -> (usize, usize) {
        (i, (i + 1) % self.count)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
