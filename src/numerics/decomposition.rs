/// Lanes of the widest register the kernel uses (one 512-bit vector of f32).
pub const WIDE_LANES: usize = 16;
pub const MEDIUM_LANES: usize = 8;
pub const NARROW_LANES: usize = 4;

/// How a fixed dimension is cut into vector chunks.
///
/// Chunks are consumed widest first:
///
/// ```text
/// [ 16 | 16 | ... | 16 ][ 8 ]?[ 4 ]?[ masked 1..=3 ]?
/// ```
///
/// Each stage starts where the previous one stopped, so the chunks tile
/// `0..dim` exactly. A plan only depends on `dim`, and the kernels read it
/// through [`Layout::SHAPE`], which makes every stage test a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposition {
    /// Number of full 16-lane chunks.
    pub wide_chunks: usize,
    /// One 8-lane chunk after the wide ones.
    pub medium: bool,
    /// One 4-lane chunk after the medium one.
    pub narrow: bool,
    /// Trailing elements (0..=3) read with a masked load.
    pub remainder: usize,
}

impl Decomposition {
    pub const fn of(dim: usize) -> Self {
        Decomposition {
            wide_chunks: dim / WIDE_LANES,
            medium: dim % WIDE_LANES >= MEDIUM_LANES,
            narrow: dim % MEDIUM_LANES >= NARROW_LANES,
            remainder: dim % NARROW_LANES,
        }
    }

    pub const fn medium_offset(&self) -> usize {
        self.wide_chunks * WIDE_LANES
    }

    pub const fn narrow_offset(&self) -> usize {
        self.medium_offset() + if self.medium { MEDIUM_LANES } else { 0 }
    }

    pub const fn remainder_offset(&self) -> usize {
        self.narrow_offset() + if self.narrow { NARROW_LANES } else { 0 }
    }

    /// Lane mask selecting the first `remainder` lanes of a 4-lane load.
    pub const fn remainder_mask(&self) -> u8 {
        (1u8 << self.remainder) - 1
    }

    /// Number of elements all stages read together.
    pub const fn covered(&self) -> usize {
        self.remainder_offset() + self.remainder
    }
}

/// Compile-time view of the plan for one dimension.
pub struct Layout<const DIM: usize>;

impl<const DIM: usize> Layout<DIM> {
    pub const SHAPE: Decomposition = {
        assert!(DIM > 0, "the kernel needs at least one dimension");
        Decomposition::of(DIM)
    };
}
