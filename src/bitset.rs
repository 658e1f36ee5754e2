//! A fixed-capacity bitset, used for adjacency sets and the propagation path

use core::fmt::Debug;

pub const WORD_SIZE: usize = std::mem::size_of::<usize>() * 8;

#[derive(Default, Clone, PartialEq, Eq)]
pub struct BitSet(Vec<usize>);

impl BitSet {
    /// Initialize a new BitSet of a given `capacity`, and fill it with zeros. The actual capacity
    /// allocated is the smallest `usize` multiple larger than `capacity`.
    pub fn zeros(capacity: usize) -> Self {
        let n = (capacity + WORD_SIZE - 1) / WORD_SIZE;

        Self(vec![usize::MIN; n])
    }

    /// Sets the bit at the given `index` on.
    /// Returns `&mut self` to allow for operation chaining.
    pub fn on(&mut self, index: usize) -> &mut Self {
        let (i, mask) = Self::locate(index);
        self.0[i] |= mask;

        self
    }

    /// Sets the bit at the given `index` off.
    /// Returns `&mut self` to allow for operation chaining.
    pub fn off(&mut self, index: usize) -> &mut Self {
        let (i, mask) = Self::locate(index);
        self.0[i] &= !mask;

        self
    }

    /// Whether the bit at `index` is on. Indices past the capacity are off.
    pub fn contains(&self, index: usize) -> bool {
        let (i, mask) = Self::locate(index);

        self.0.get(i).map_or(false, |word| word & mask != 0)
    }

    /// Number of bits turned on.
    pub fn count(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Zeros out the bitset, effectively resetting it.
    pub fn zero(&mut self) {
        self.0.fill(0usize);
    }

    /// Iterate over the indices of all bits that are on, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().flat_map(|(i, &word)| {
            (0..WORD_SIZE)
                .filter(move |j| word & (1usize << j) != 0)
                .map(move |j| i * WORD_SIZE + j)
        })
    }

    fn locate(index: usize) -> (usize, usize) {
        (index / WORD_SIZE, 1usize << (index % WORD_SIZE))
    }
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
