use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::isa::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A grid position. Absence of a cell is its own state so that creating
/// one is always an explicit transition through [`Slot::materialize`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Populated(Cell),
}

impl Slot {
    pub fn is_populated(&self) -> bool {
        matches!(self, Slot::Populated(_))
    }

    pub fn cell(&self) -> Option<&Cell> {
        match self {
            Slot::Populated(cell) => Some(cell),
            Slot::Empty => None,
        }
    }

    pub(crate) fn cell_mut(&mut self) -> Option<&mut Cell> {
        match self {
            Slot::Populated(cell) => Some(cell),
            Slot::Empty => None,
        }
    }

    /// Empty -> Populated with a fresh cell. Returns whether a cell was created.
    pub(crate) fn materialize(&mut self, init_opcode: u8) -> bool {
        match self {
            Slot::Populated(_) => false,
            Slot::Empty => {
                *self = Slot::Populated(Cell::fresh(init_opcode));
                true
            }
        }
    }
}

/// Toroidal `width x height` array of slots, stored row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    slots: Vec<Slot>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = Error::InvalidGeometry { width, height };
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or_else(|| invalid.clone())?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(len).map_err(|_| invalid)?;
        slots.resize(len, Slot::Empty);
        Ok(Self { width, height, slots })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.y * self.width + coord.x)
    }

    fn coord(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    pub fn slot(&self, coord: Coord) -> Option<&Slot> {
        self.index(coord).map(|i| &self.slots[i])
    }

    pub(crate) fn slot_mut(&mut self, coord: Coord) -> Option<&mut Slot> {
        self.index(coord).map(move |i| &mut self.slots[i])
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.slot(coord).and_then(Slot::cell)
    }

    pub(crate) fn slot_mut_checked(&mut self, coord: Coord) -> Result<&mut Slot> {
        let (width, height) = (self.width, self.height);
        self.slot_mut(coord).ok_or(Error::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width,
            height,
        })
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.slot_mut(coord).and_then(Slot::cell_mut)
    }

    /// Slots in scan order: every `x` of row 0, then row 1, and so on.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, slot)| (self.coord(i), slot))
    }

    /// Where a cell at `from` lands when it looks in `direction`.
    /// Every edge wraps.
    pub fn target(&self, from: Coord, direction: Direction) -> Coord {
        let Coord { x, y } = from;
        match direction {
            Direction::Here => from,
            Direction::North => Coord::new(x, (y + 1) % self.height),
            Direction::South => Coord::new(x, (y + self.height - 1) % self.height),
            Direction::East => Coord::new((x + 1) % self.width, y),
            Direction::West => Coord::new((x + self.width - 1) % self.width, y),
        }
    }
}
