use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bitset::BitSet;
use crate::error::WaveError;
use crate::module::Module;
use crate::traits::Constraint;
use crate::types::Direction;
use crate::wave::Wave;

/// An ordered catalog of tile contents, from which a `Wave` is built.
///
/// Order matters: the position of a tile in the set becomes the id of its `Module`.
pub struct TileSet<T> {
    pub data: Vec<T>,
}

impl<T> TileSet<T> {
    pub fn new(data: Vec<T>) -> Self {
        TileSet { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn validate(&self, width: usize, height: usize) -> Result<(), WaveError> {
        if self.data.is_empty() {
            return Err(WaveError::EmptyTileSet);
        }

        if width == 0 || height == 0 {
            return Err(WaveError::InvalidDimensions { width, height });
        }

        Ok(())
    }

    fn into_modules(self, adjacency: Vec<[BitSet; 4]>) -> Vec<Module<T>> {
        self.data
            .into_iter()
            .zip(adjacency)
            .enumerate()
            .map(|(id, (content, adjacency))| Module::new(id, content, adjacency))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
impl<T> TileSet<T> {
    /// Build a `width` by `height` `Wave` whose adjacency rules are derived from `constraint`.
    pub fn wave_with<C>(self, width: usize, height: usize, constraint: C) -> Result<Wave<T>, WaveError>
    where
        C: Constraint<T>,
    {
        self.validate(width, height)?;

        let adjacency: Vec<_> = self
            .data
            .iter()
            .map(|from| derive_adjacency(&self.data, &constraint, from))
            .collect();

        Ok(Wave::new(self.into_modules(adjacency), width, height))
    }
}

#[cfg(feature = "parallel")]
impl<T> TileSet<T>
where
    T: Sync,
{
    /// Build a `width` by `height` `Wave` whose adjacency rules are derived from `constraint`.
    ///
    /// Rules for each tile are derived in parallel.
    pub fn wave_with<C>(self, width: usize, height: usize, constraint: C) -> Result<Wave<T>, WaveError>
    where
        C: Constraint<T> + Sync,
    {
        self.validate(width, height)?;

        let adjacency: Vec<_> = self
            .data
            .par_iter()
            .map(|from| derive_adjacency(&self.data, &constraint, from))
            .collect();

        Ok(Wave::new(self.into_modules(adjacency), width, height))
    }
}

/// Evaluate `constraint` from `from` against every tile of `data`, in every direction.
fn derive_adjacency<T, C>(data: &[T], constraint: &C, from: &T) -> [BitSet; 4]
where
    C: Constraint<T>,
{
    Direction::ALL.map(|direction| {
        let mut allowed = BitSet::zeros(data.len());

        for (id, to) in data.iter().enumerate() {
            if constraint.compatible(from, to, direction) {
                allowed.on(id);
            }
        }

        debug!("{} neighbors allowed {direction:?}", allowed.count());

        allowed
    })
}
