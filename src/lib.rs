//! Wave function collapse over a grid of tiles.
//!
//! A `TileSet` of tile contents is turned into a `Wave`: a grid of `Slot`s that all start in a
//! superposition of every `Module` of the catalog. Each attempt collapses a random slot to a
//! single module and propagates the resulting restriction to its neighbors until the grid settles
//! or a contradiction is found.

mod bitset;
mod types;

pub mod data;
pub mod error;
pub mod impls;
pub mod module;
pub mod prelude;
pub mod slot;
pub mod traits;
pub mod wave;

pub use data::TileSet;
pub use error::WaveError;
pub use module::Module;
pub use slot::Slot;
pub use traits::Adjacency;
pub use traits::Constraint;
pub use traits::IsPossible;
pub use types::Direction;
pub use types::ModuleId;
pub use wave::Wave;

#[cfg(feature = "image")]
pub use impls::image::EdgeSampling;

pub use rand;
