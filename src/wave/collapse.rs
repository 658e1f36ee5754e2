use log::{debug, info, trace, warn};
use rand::Rng;

use crate::error::WaveError;
use crate::types::Direction;

use super::Wave;

impl<T> Wave<T> {
    /// Runs `attempts` attempts of the collapse, one after the other.
    ///
    /// Attempts are cumulative: the grid is not reset between them, and each one narrows the state
    /// the previous one left behind. Not every tile set admits a solution, so the first
    /// contradiction aborts the run. The partially collapsed grid is kept as is and can still be
    /// inspected or exported to find the tiles causing it.
    pub fn collapse<R>(&mut self, attempts: usize, rng: &mut R) -> Result<(), WaveError>
    where
        R: Rng + ?Sized,
    {
        for iter in 0..attempts {
            let result = self.attempt(rng);
            self.clear_history();

            if let Err(err) = result {
                warn!("attempt {iter} failed: {err}");
                return Err(err);
            }
        }

        info!(
            "ran {attempts} attempts, grid is {}",
            if self.is_collapsed() { "collapsed" } else { "still superposed" }
        );

        Ok(())
    }

    /// One attempt: collapse a random slot that still has a choice to make, then propagate the
    /// restriction to its neighbors, and to theirs, until nothing changes any more.
    ///
    /// Propagation is depth first. From the most recently changed slot, each direction is tried in
    /// `Direction::ALL` order. A neighbor that is on the current path is skipped. Otherwise its
    /// superposition is filtered through the `IsPossible` predicate; if nothing was removed the
    /// direction is done, if everything was removed the attempt fails, and if something was removed
    /// the neighbor becomes the new current slot. Once all its directions are done, a slot leaves
    /// the path and its parent moves on to its next direction.
    ///
    /// The path is kept in the wave and is not cleared here; `Wave::collapse` clears it between
    /// attempts. An attempt on a fully collapsed grid does nothing.
    pub fn attempt<R>(&mut self, rng: &mut R) -> Result<(), WaveError>
    where
        R: Rng + ?Sized,
    {
        if self.is_collapsed() {
            return Ok(());
        }

        // pick a starting point
        if self.history.is_empty() {
            let Some((x, y)) = self.collapse_random_slot(rng) else {
                return Ok(());
            };

            self.push_history(self.flat_index(x, y));
        }

        self.propagate()
    }

    /// Takes a random slot and collapses it into a single module. If the slot is already
    /// collapsed, another one is drawn, until a slot with a choice left is found.
    ///
    /// Returns the coordinates of the collapsed slot, or `None` if every slot is already collapsed.
    pub fn collapse_random_slot<R>(&mut self, rng: &mut R) -> Option<(usize, usize)>
    where
        R: Rng + ?Sized,
    {
        if self.is_collapsed() {
            return None;
        }

        let n = self.slots.len();

        loop {
            let slot = self.slot_at_mut(rng.gen_range(0..n));

            if slot.is_collapsed() {
                continue;
            }

            let module = slot.collapse(rng);
            debug!("collapsed ({}, {}) to module {module}", slot.x(), slot.y());

            return Some((slot.x(), slot.y()));
        }
    }

    fn propagate(&mut self) -> Result<(), WaveError> {
        // for each slot on the path, the position in `Direction::ALL` of the next direction to try
        let mut next_direction = vec![0; self.history.len()];

        while let Some(&current) = self.history.last() {
            let depth = self.history.len() - 1;

            let Some(&d) = Direction::ALL.get(next_direction[depth]) else {
                // the starting slot stays on the path until the attempt is over
                if depth == 0 {
                    break;
                }

                self.pop_history();
                next_direction.pop();
                continue;
            };
            next_direction[depth] += 1;

            let Some(next) = self.neighbor_index(current, d) else {
                continue;
            };

            if self.has_visited(next) {
                continue;
            }

            let (from, to) = (self.slot_at(current), self.slot_at(next));
            let possible = self.possible_modules(from, to, d);

            // same state as before, no reason to go further
            if possible.len() == to.entropy() {
                continue;
            }

            trace!(
                "({}, {}) narrowed from {} to {} modules",
                to.x(),
                to.y(),
                to.entropy(),
                possible.len()
            );

            let to = self.slot_at_mut(next);
            to.narrow(possible);

            if to.is_contradiction() {
                return Err(WaveError::Contradiction {
                    x: to.x(),
                    y: to.y(),
                });
            }

            self.push_history(next);
            next_direction.push(0);
        }

        Ok(())
    }
}
