use rand::Rng;

use crate::types::ModuleId;

/// A `Slot` is one cell of the grid, holding the modules it could still become.
///
/// The superposition keeps catalog order and only ever shrinks during a run: to a single module
/// when the slot is collapsed, and to nothing when a contradiction is reached.
#[derive(Clone, Debug)]
pub struct Slot {
    x: usize,
    y: usize,
    superposition: Vec<ModuleId>,
}

impl Slot {
    /// Create a new `Slot` at `(x, y)` in a superposition of every module of a catalog of size
    /// `num_modules`.
    pub(crate) fn new(x: usize, y: usize, num_modules: usize) -> Self {
        Slot {
            x,
            y,
            superposition: (0..num_modules).collect(),
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// The modules still possible at this slot.
    pub fn superposition(&self) -> &[ModuleId] {
        &self.superposition
    }

    /// Number of modules still possible at this slot.
    pub fn entropy(&self) -> usize {
        self.superposition.len()
    }

    /// Either resolved to a single module or in contradiction.
    pub fn is_collapsed(&self) -> bool {
        self.superposition.len() <= 1
    }

    pub fn is_contradiction(&self) -> bool {
        self.superposition.is_empty()
    }

    /// The module this slot resolved to, if it holds exactly one.
    pub fn module(&self) -> Option<ModuleId> {
        match self.superposition.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Collapses a `Slot` to one of its possible modules, at random, and returns it.
    pub fn collapse<R>(&mut self, rng: &mut R) -> ModuleId
    where
        R: Rng + ?Sized,
    {
        assert!(self.entropy() > 1, "called collapse on a collapsed Slot!");

        let chosen = self.superposition[rng.gen_range(0..self.superposition.len())];
        self.superposition.clear();
        self.superposition.push(chosen);

        chosen
    }

    /// Replace the superposition with a filtered subset of itself.
    pub(crate) fn narrow(&mut self, superposition: Vec<ModuleId>) {
        debug_assert!(superposition.len() <= self.superposition.len());
        debug_assert!(superposition.iter().all(|m| self.superposition.contains(m)));

        self.superposition = superposition;
    }
}
