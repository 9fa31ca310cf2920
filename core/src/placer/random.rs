use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement without rejection sampling: the eligible cells are collected once and
/// `count` distinct ones are drawn from them.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    seed: u64,
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this placer was created with, enough to replay the same sequence of boards.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(&mut self, grid: &mut Grid, count: CellCount) -> CellCount {
        let free_cells: Vec<Coord2> = grid
            .iter()
            .filter(|(_, cell)| cell.can_hold_mine())
            .map(|(coords, _)| coords)
            .collect();

        let amount = usize::from(count).min(free_cells.len());
        if amount < usize::from(count) {
            log::warn!(
                "Not enough free cells for mines, requested {} but only fits {}",
                count,
                free_cells.len()
            );
        }

        for i in index::sample(&mut self.rng, free_cells.len(), amount) {
            let coords = free_cells[i];
            log::trace!("Mine placed at {:?}", coords);
            grid[coords].set_mine(true);
        }

        amount as CellCount
    }
}
