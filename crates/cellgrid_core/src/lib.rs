pub mod cell;
pub mod error;
pub mod isa;
pub mod world;

pub use cell::{Cell, Image, Registers};
pub use error::{Error, Result};
pub use isa::{Assembler, Canonical, Direction, EmptyRead, Instruction, InstructionSet, Legacy, Opcode};
pub use world::{Coord, Grid, PendingWrite, Slot, StepReport, World};

/// Bytes of memory owned by every cell. Program store and data store share it.
pub const MEMORY_SIZE: usize = 256;

/// A cell's memory. Indexed directly by `u8` addresses, so every address is valid.
pub type Memory = [u8; MEMORY_SIZE];
