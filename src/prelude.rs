pub use crate::data::TileSet;
pub use crate::error::WaveError;

pub use crate::module::Module;
pub use crate::slot::Slot;
pub use crate::wave::Wave;

pub use crate::traits::Adjacency;
pub use crate::traits::Constraint;
pub use crate::traits::IsPossible;

pub use crate::types::Direction;
pub use crate::types::ModuleId;

#[cfg(feature = "image")]
pub use crate::impls::image::EdgeSampling;

