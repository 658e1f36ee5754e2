use std::fmt::Debug;

use crate::bitset::BitSet;
use crate::types::Direction;
use crate::types::ModuleId;

/// A `Module` is one entry of the tile catalog: an opaque tile `content` together with, for each
/// direction, the set of modules allowed to sit next to it in that direction.
///
/// Modules are built once when the `Wave` is created and never change afterwards. Two modules
/// with identical content are still distinct if they come from distinct catalog entries.
pub struct Module<T> {
    id: ModuleId,
    content: T,

    /// Indexed by `Direction::index`
    adjacency: [BitSet; 4],
}

impl<T> Module<T> {
    pub(crate) fn new(id: ModuleId, content: T, adjacency: [BitSet; 4]) -> Self {
        Module {
            id,
            content,
            adjacency,
        }
    }

    /// The position of this module in the catalog.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    /// Whether module `other` may occupy the neighboring slot in `direction`.
    pub fn allows(&self, direction: Direction, other: ModuleId) -> bool {
        self.adjacency[direction.index()].contains(other)
    }

    /// All modules allowed as neighbor in `direction`, in catalog order.
    pub fn adjacent(&self, direction: Direction) -> impl Iterator<Item = ModuleId> + '_ {
        self.adjacency[direction.index()].iter()
    }
}

impl<T> Debug for Module<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id)
            .field("up", &self.adjacency[0])
            .field("down", &self.adjacency[1])
            .field("left", &self.adjacency[2])
            .field("right", &self.adjacency[3])
            .finish()
    }
}
