//! Instruction sets understood by cells.
//!
//! Two encodings of the same machine are in circulation. They disagree on
//! opcode numbering, on what `BR` means and on how a byte becomes a
//! direction, so the engine never hard-codes either one: it is generic over
//! [`InstructionSet`] and only ever sees decoded [`Opcode`]s.

mod asm;
mod canonical;
mod disasm;
mod exec;
mod legacy;

use std::fmt;

pub use asm::Assembler;
pub use canonical::Canonical;
pub use disasm::Instruction;
pub use exec::{execute, Outcome, Write};
pub use legacy::Legacy;

/// Number of distinct opcodes in every encoding. Decoders mask with this.
pub const OPCODE_COUNT: u8 = 8;

/// Decoded instruction semantics, independent of any byte encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `a := memory[p]`, consuming the immediate byte.
    Set,
    /// `(a, x, y, z) := (z, a, x, y)`.
    Rot,
    /// `a := target.memory[x]`.
    In,
    /// Deferred `target.memory[x] := a`.
    Out,
    /// `a := a + x` (mod 256).
    Add,
    /// `t := direction(a)`.
    At,
    /// Unconditional `p := p + a`.
    Br,
    /// `p := p + a` only when `x == y`.
    BrEq,
    /// Reset the target's registers and write INIT to its address 0.
    Init,
}

impl Opcode {
    /// Encoded width in bytes, including the immediate.
    pub const fn width(self) -> u8 {
        match self {
            Opcode::Set => 2,
            _ => 1,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Set => "SET",
            Opcode::Rot => "ROT",
            Opcode::In => "IN",
            Opcode::Out => "OUT",
            Opcode::Add => "ADD",
            Opcode::At => "AT",
            Opcode::Br => "BR",
            Opcode::BrEq => "BREQ",
            Opcode::Init => "INIT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Value of a cell's direction register: which slot IN, OUT and INIT hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The executing cell itself.
    #[default]
    Here,
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed enumeration order used when a byte is reduced to a direction.
    pub const ALL: [Direction; 5] = [
        Direction::Here,
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Here => "SELF",
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        })
    }
}

/// What `IN` does when the targeted slot holds no cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyRead {
    /// Read the INIT opcode and leave the slot empty.
    AsInit,
    /// Create the cell, then read from its fresh memory (INIT everywhere).
    Materialize,
}

/// A byte encoding of the cell machine.
///
/// `decode` must be total: every byte maps to some opcode, so a running
/// cell can never hit an unknown instruction.
pub trait InstructionSet {
    fn name(&self) -> &'static str;

    fn decode(&self, byte: u8) -> Opcode;

    /// `None` when this encoding has no byte for `opcode`.
    fn encode(&self, opcode: Opcode) -> Option<u8>;

    /// Byte that fresh memory is filled with.
    fn init_opcode(&self) -> u8;

    fn direction(&self, value: u8) -> Direction;

    /// A byte that `AT` turns into `direction`.
    fn encode_direction(&self, direction: Direction) -> u8;

    fn empty_read(&self) -> EmptyRead;
}
