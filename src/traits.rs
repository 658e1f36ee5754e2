use crate::module::Module;
use crate::slot::Slot;
use crate::types::Direction;

/// Decides whether tile content `to` may be placed in the slot next to `from`, in `direction`.
///
/// A constraint is evaluated once for every ordered pair of catalog entries (a tile paired with
/// itself included) and every direction when a `Wave` is built; the results are cached on each
/// `Module`. It must be deterministic. The engine does not assume any symmetry between a
/// direction and its opposite, so a constraint wanting symmetric rules has to provide them.
///
/// Any `Fn(&T, &T, Direction) -> bool` is a constraint.
pub trait Constraint<T> {
    fn compatible(&self, from: &T, to: &T, direction: Direction) -> bool;
}

impl<T, F> Constraint<T> for F
where
    F: Fn(&T, &T, Direction) -> bool,
{
    fn compatible(&self, from: &T, to: &T, direction: Direction) -> bool {
        self(from, to, direction)
    }
}

/// Decides whether `candidate`, still in the superposition of slot `to`, remains viable given the
/// current superposition of slot `from`, its neighbor in `direction`.
///
/// Override this to slow down the collapse or to add probabilities. Any
/// `Fn(&[Module<T>], &Module<T>, &Slot, &Slot, Direction) -> bool` is a predicate.
pub trait IsPossible<T> {
    fn is_possible(
        &self,
        modules: &[Module<T>],
        candidate: &Module<T>,
        from: &Slot,
        to: &Slot,
        direction: Direction,
    ) -> bool;
}

impl<T, F> IsPossible<T> for F
where
    F: Fn(&[Module<T>], &Module<T>, &Slot, &Slot, Direction) -> bool,
{
    fn is_possible(
        &self,
        modules: &[Module<T>],
        candidate: &Module<T>,
        from: &Slot,
        to: &Slot,
        direction: Direction,
    ) -> bool {
        self(modules, candidate, from, to, direction)
    }
}

/// The default predicate: a candidate survives if at least one module still possible in `from`
/// lists it as an allowed neighbor in `direction`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Adjacency;

impl<T> IsPossible<T> for Adjacency {
    fn is_possible(
        &self,
        modules: &[Module<T>],
        candidate: &Module<T>,
        from: &Slot,
        _to: &Slot,
        direction: Direction,
    ) -> bool {
        from.superposition()
            .iter()
            .filter_map(|&m| modules.get(m))
            .any(|m| m.allows(direction, candidate.id()))
    }
}
