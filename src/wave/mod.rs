use std::fmt::Debug;

use ndarray::Array2;

use crate::bitset::BitSet;
use crate::module::Module;
use crate::slot::Slot;
use crate::traits::Adjacency;
use crate::traits::IsPossible;
use crate::types::Direction;
use crate::types::FlatIndex;
use crate::types::ModuleId;

mod collapse;

/// The state of a wave function collapse over a `width` by `height` grid of `Slot`s.
///
/// Every slot starts in a superposition of the whole module catalog. Each attempt of
/// `Wave::collapse` resolves one random slot to a single module and propagates that restriction,
/// depth first, to every slot it affects. See `Wave::attempt` for the details.
pub struct Wave<T> {
    width: usize,
    height: usize,

    modules: Vec<Module<T>>,

    /// shape `(height, width)`, so that the standard layout is row-major
    slots: Array2<Slot>,

    // the path of slots currently being propagated, and the same path as a bitmap
    history: Vec<FlatIndex>,
    visited: BitSet,

    is_possible: Box<dyn IsPossible<T> + Send + Sync>,
}

impl<T> Wave<T> {
    /// Create a new `Wave` from a non-empty catalog and non-zero dimensions. Use `TileSet` to
    /// build one.
    pub(crate) fn new(modules: Vec<Module<T>>, width: usize, height: usize) -> Self {
        let mut wave = Wave {
            width,
            height,
            slots: Array2::from_shape_fn((height, width), |(y, x)| {
                Slot::new(x, y, modules.len())
            }),
            modules,
            history: Vec::new(),
            visited: BitSet::zeros(width * height),
            is_possible: Box::new(Adjacency),
        };

        wave.initialize();

        wave
    }

    /// Replace the predicate deciding whether a module stays possible during propagation.
    pub fn with_is_possible<P>(mut self, is_possible: P) -> Self
    where
        P: IsPossible<T> + Send + Sync + 'static,
    {
        self.set_is_possible(is_possible);
        self
    }

    pub fn set_is_possible<P>(&mut self, is_possible: P)
    where
        P: IsPossible<T> + Send + Sync + 'static,
    {
        self.is_possible = Box::new(is_possible);
    }

    /// Put every slot back in a superposition of all modules, with each module equally likely.
    pub fn initialize(&mut self) {
        let num_modules = self.modules.len();

        for slot in self.slots.iter_mut() {
            *slot = Slot::new(slot.x(), slot.y(), num_modules);
        }

        self.clear_history();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The module catalog, indexed by `ModuleId`.
    pub fn modules(&self) -> &[Module<T>] {
        &self.modules
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module<T>> {
        self.modules.get(id)
    }

    /// The slot at `(x, y)`, or `None` outside of the grid.
    pub fn slot(&self, x: usize, y: usize) -> Option<&Slot> {
        self.slots.get([y, x])
    }

    /// All slots, in row-major order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Whether every slot holds at most one module, either resolved or in contradiction.
    pub fn is_collapsed(&self) -> bool {
        self.slots.iter().all(Slot::is_collapsed)
    }

    /// Whether `slot` has a neighbor in direction `d`. The grid does not wrap around, and a slot
    /// lying outside of this grid has no neighbors.
    pub fn has_neighbor(&self, slot: &Slot, d: Direction) -> bool {
        self.neighbor(slot, d).is_some()
    }

    pub fn neighbor(&self, slot: &Slot, d: Direction) -> Option<&Slot> {
        if slot.x() >= self.width || slot.y() >= self.height {
            return None;
        }

        self.neighbor_index(self.flat_index(slot.x(), slot.y()), d)
            .map(|i| self.slot_at(i))
    }

    /// Returns the modules of `to` that remain possible when travelling from `from` to `to` in
    /// direction `d`, keeping their order. Ids outside of the catalog are never possible.
    pub fn possible_modules(&self, from: &Slot, to: &Slot, d: Direction) -> Vec<ModuleId> {
        to.superposition()
            .iter()
            .copied()
            .filter(|&m| {
                self.modules.get(m).map_or(false, |candidate| {
                    self.is_possible
                        .is_possible(&self.modules, candidate, from, to, d)
                })
            })
            .collect()
    }

    fn flat_index(&self, x: usize, y: usize) -> FlatIndex {
        x + y * self.width
    }

    fn slot_at(&self, index: FlatIndex) -> &Slot {
        &self.slots[[index / self.width, index % self.width]]
    }

    fn slot_at_mut(&mut self, index: FlatIndex) -> &mut Slot {
        &mut self.slots[[index / self.width, index % self.width]]
    }

    fn neighbor_index(&self, index: FlatIndex, d: Direction) -> Option<FlatIndex> {
        let (dx, dy) = d.offset();

        let x = (index % self.width).checked_add_signed(dx)?;
        let y = (index / self.width).checked_add_signed(dy)?;

        (x < self.width && y < self.height).then(|| self.flat_index(x, y))
    }

    fn has_visited(&self, index: FlatIndex) -> bool {
        self.visited.contains(index)
    }

    fn push_history(&mut self, index: FlatIndex) {
        self.history.push(index);
        self.visited.on(index);
    }

    fn pop_history(&mut self) {
        if let Some(index) = self.history.pop() {
            self.visited.off(index);
        }
    }

    fn clear_history(&mut self) {
        self.history.clear();
        self.visited.zero();
    }
}

impl<T> Debug for Wave<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wave")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("modules", &self.modules.len())
            .field("collapsed", &self.is_collapsed())
            .finish()
    }
}
