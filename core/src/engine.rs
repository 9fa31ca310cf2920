use core::ops::BitOr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One play session over a single grid.
///
/// Mines are placed when the session is created and again on [`GameEngine::reset`]. The
/// placer is also consulted once if the very first reveal lands on a mine, to move that
/// mine elsewhere.
#[derive(Clone, Debug)]
pub struct GameEngine<P = RandomMinePlacer> {
    grid: Grid,
    placer: P,
    mine_count: CellCount,
    revealed_count: CellCount,
    flags_remaining: i32,
    phase: Phase,
    detonated: Option<Coord2>,
}

impl GameEngine<RandomMinePlacer> {
    /// Creates a session with randomly placed mines.
    pub fn new_session(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(height, width, mines)?;
        let placer = RandomMinePlacer::from_entropy();
        log::debug!("seed: {}", placer.seed());
        Ok(Self::new(config, placer))
    }
}

impl<P: MinePlacer> GameEngine<P> {
    pub fn new(config: GameConfig, mut placer: P) -> Self {
        let (height, width) = config.size;
        let mut grid = Grid::new(height, width);
        let placed = placer.place(&mut grid, config.mines);
        assert_eq!(placed, config.mines, "placer left mines unplaced");
        log::debug!(
            "New session {}x{} with {} mines",
            height,
            width,
            config.mines
        );
        Self::from_parts(grid, placer, config.mines)
    }

    /// Wraps an already armed grid; `placer` is only used for first-click relocation and
    /// [`GameEngine::reset`].
    pub fn from_grid(grid: Grid, placer: P) -> Result<Self> {
        let (height, width) = grid.size();
        let mines = grid.count_mines();
        GameConfig::new(height, width, mines)?;
        Ok(Self::from_parts(grid, placer, mines))
    }

    fn from_parts(grid: Grid, placer: P, mine_count: CellCount) -> Self {
        Self {
            grid,
            placer,
            mine_count,
            revealed_count: 0,
            flags_remaining: mine_count.into(),
            phase: Phase::InProgress,
            detonated: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.grid.size(),
            mines: self.mine_count,
        }
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines minus flags placed; negative when the player over-flags.
    pub fn flags_remaining(&self) -> i32 {
        self.flags_remaining
    }

    /// The mine that ended the game, if it was lost.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn visibility_of(&self, coords: Coord2) -> Result<Visibility> {
        Ok(self.grid.cell_at(coords)?.visibility())
    }

    pub fn marker_at(&self, coords: Coord2) -> Result<CellMarker> {
        Ok(self.grid.cell_at(coords)?.marker())
    }

    /// Whether a mine is shown at `coords`; only ever true after a loss.
    pub fn is_mine_revealed_at(&self, coords: Coord2) -> Result<bool> {
        let marker = self.grid.cell_at(coords)?.marker();
        Ok(matches!(marker, CellMarker::Mine | CellMarker::Detonated))
    }

    /// Number shown on a revealed cell, `None` while the cell is not revealed.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<Option<u8>> {
        let cell = self.grid.cell_at(coords)?;
        Ok(match cell.visibility() {
            Visibility::Revealed => Some(self.grid.adjacent_mine_count(coords)),
            _ => None,
        })
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_engine(self)
    }

    /// Left click: reveal a hidden cell, or chord a revealed one.
    pub fn activate_primary(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use Visibility::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.phase.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = &self.grid[coords];
        let (visibility, is_mine) = (cell.visibility(), cell.is_mine());
        Ok(match visibility {
            Hidden if is_mine && self.revealed_count == 0 => {
                self.relocate_mine(coords);
                self.reveal_cell(coords)
            }
            Hidden if is_mine => {
                self.detonate(coords);
                RevealOutcome::HitMine
            }
            Hidden => self.reveal_cell(coords),
            Revealed => self.chord(coords),
            Flagged | Possible => RevealOutcome::NoChange,
        })
    }

    /// Right click: cycle `Hidden -> Flagged -> Possible -> Hidden` on an unrevealed cell.
    pub fn activate_secondary(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.phase.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let current = self.grid[coords].visibility();
        let Some(next) = current.next_mark() else {
            return Ok(MarkOutcome::NoChange);
        };

        if current == Visibility::Flagged {
            self.flags_remaining += 1;
        }
        if next == Visibility::Flagged {
            self.flags_remaining -= 1;
        }
        self.grid[coords].set_visibility(next);

        Ok(MarkOutcome::Changed)
    }

    /// Re-randomizes the mines and starts over on the same grid.
    pub fn reset(&mut self) {
        self.grid.clear();
        let placed = self.placer.place(&mut self.grid, self.mine_count);
        assert_eq!(placed, self.mine_count, "placer left mines unplaced");
        self.revealed_count = 0;
        self.flags_remaining = self.mine_count.into();
        self.phase = Phase::InProgress;
        self.detonated = None;
        log::debug!("Session reset");
    }

    /// Moves the mine under the first click somewhere else.
    fn relocate_mine(&mut self, coords: Coord2) {
        log::debug!("First reveal hit mine at {:?}, relocating", coords);
        let cell = &mut self.grid[coords];
        cell.set_mine(false);
        // revealed cells are never chosen by a placer
        cell.set_visibility(Visibility::Revealed);
        let placed = self.placer.place(&mut self.grid, 1);
        assert_eq!(placed, 1, "no free cell to relocate the first mine");
        self.grid[coords].set_visibility(Visibility::Hidden);
    }

    fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        let neighbors: SmallVec<[Coord2; 8]> = self.grid[coords].neighbors().into();
        let flagged_count = neighbors
            .iter()
            .filter(|&&pos| self.grid[pos].visibility() == Visibility::Flagged)
            .count();
        let adjacent_mines = usize::from(self.grid.adjacent_mine_count(coords));

        if flagged_count != adjacent_mines {
            return RevealOutcome::NoChange;
        }

        // neighbor order decides which mine counts as the detonation
        let unflagged_mine = neighbors.iter().copied().find(|&pos| {
            let cell = &self.grid[pos];
            cell.is_mine() && cell.visibility() != Visibility::Flagged
        });

        if let Some(mine) = unflagged_mine {
            log::debug!("Chord at {:?} set off mine at {:?}", coords, mine);
            self.grid[coords].set_marker(CellMarker::ChordOrigin);
            self.detonate(mine);
            return RevealOutcome::HitMine;
        }

        neighbors
            .into_iter()
            .map(|pos| self.reveal_cell(pos))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange)
    }

    /// Flood-fills from a hidden safe cell, then checks for a win.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.grid[coords].visibility() != Visibility::Hidden {
            return RevealOutcome::NoChange;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(pos) = to_visit.pop_front() {
            let cell = &mut self.grid[pos];
            // a neighbor may be queued twice before it is revealed
            if cell.visibility() != Visibility::Hidden {
                continue;
            }
            assert!(!cell.is_mine(), "flood-fill reached mine at {pos:?}");

            cell.set_visibility(Visibility::Revealed);
            self.revealed_count += 1;

            let adjacent_mines = self.grid.adjacent_mine_count(pos);
            log::trace!("Revealed {:?}, adjacent mines: {}", pos, adjacent_mines);

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.grid[pos]
                        .neighbors()
                        .iter()
                        .copied()
                        .filter(|&next| self.grid[next].visibility() == Visibility::Hidden),
                );
            }
        }

        if self.revealed_count == self.grid.total_cells() - self.mine_count {
            self.phase = Phase::Won;
            log::debug!("Session won with {} cells revealed", self.revealed_count);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn detonate(&mut self, coords: Coord2) {
        self.grid[coords].set_marker(CellMarker::Detonated);
        self.detonated = Some(coords);
        self.phase = Phase::Lost;
        log::debug!("Session lost at {:?}", coords);
        self.reveal_mines();
    }

    /// Marks unflagged mines and wrong flags for display after a loss.
    fn reveal_mines(&mut self) {
        for (_, cell) in self.grid.iter_mut() {
            match (cell.visibility(), cell.is_mine()) {
                (Visibility::Flagged, false) => cell.set_marker(CellMarker::Misflag),
                (Visibility::Flagged, true) => {}
                (_, true) if cell.marker() != CellMarker::Detonated => {
                    cell.set_marker(CellMarker::Mine)
                }
                _ => {}
            }
        }
    }
}
