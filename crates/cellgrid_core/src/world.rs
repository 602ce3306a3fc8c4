//! The grid of cells and the generation step.

mod grid;
mod step;

pub use grid::{Coord, Grid, Slot};
pub use step::{PendingWrite, StepReport};

use crate::cell::{Cell, Image};
use crate::error::{Error, Result};
use crate::isa::{Canonical, InstructionSet};

/// Owns every cell. Nothing outside the world holds a cell, and the only
/// way cell state changes after seeding is [`World::step`].
pub struct World<I: InstructionSet = Canonical> {
    grid: Grid,
    isa: I,
    generation: u64,
}

impl World<Canonical> {
    /// An all-empty `width x height` world using the canonical encoding.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_isa(width, height, Canonical)
    }
}

impl<I: InstructionSet> World<I> {
    pub fn with_isa(width: usize, height: usize, isa: I) -> Result<Self> {
        let grid = Grid::new(width, height)?;
        log::debug!("{}x{} world, {} encoding", width, height, isa.name());
        Ok(Self {
            grid,
            isa,
            generation: 0,
        })
    }

    pub fn isa(&self) -> &I {
        &self.isa
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of generations committed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slot(&self, x: usize, y: usize) -> Option<&Slot> {
        self.grid.slot(Coord::new(x, y))
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.grid.cell(Coord::new(x, y))
    }

    /// Populated slots in scan order.
    pub fn populated(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.grid
            .iter()
            .filter_map(|(coord, slot)| slot.cell().map(|cell| (coord, cell)))
    }

    /// Place a cell running `image` at `(x, y)`. Registers start zeroed
    /// with direction SELF.
    pub fn seed(&mut self, x: usize, y: usize, image: Image) -> Result<()> {
        let coord = Coord::new(x, y);
        let slot = self.grid.slot_mut_checked(coord)?;
        if slot.is_populated() {
            return Err(Error::Occupied { x, y });
        }
        *slot = Slot::Populated(Cell::with_image(image));
        log::debug!("seeded cell at ({}, {})", x, y);
        Ok(())
    }

    /// [`World::seed`] with a short program padded by this encoding's INIT opcode.
    pub fn seed_padded(&mut self, x: usize, y: usize, program: &[u8]) -> Result<()> {
        let image = Image::padded(program, self.isa.init_opcode())?;
        self.seed(x, y, image)
    }

    /// Advance `generations` generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.grid.slot_mut(Coord::new(x, y)) {
            *slot = Slot::Populated(cell);
        }
    }
}

#[cfg(test)]
mod tests;
