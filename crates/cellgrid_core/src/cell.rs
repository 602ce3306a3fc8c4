use std::fmt;

use crate::error::{Error, Result};
use crate::isa::{execute, Direction, Instruction, InstructionSet, Outcome, Write};
use crate::{Memory, MEMORY_SIZE};

/// Register file of one cell.
///
/// Every field is a byte (or a direction) so there is no value a register
/// can hold that the machine cannot represent; `p` indexes memory directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub z: u8,
    /// Program counter.
    pub p: u8,
    /// Direction register.
    pub t: Direction,
}

impl Registers {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A full program image, exactly [`MEMORY_SIZE`] bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image(Memory);

impl Image {
    pub fn filled(byte: u8) -> Self {
        Self([byte; MEMORY_SIZE])
    }

    /// Pad `bytes` with `fill` up to a full image. Longer input is rejected.
    pub fn padded(bytes: &[u8], fill: u8) -> Result<Self> {
        if bytes.len() > MEMORY_SIZE {
            return Err(Error::SizeMismatch {
                expected: MEMORY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut memory = [fill; MEMORY_SIZE];
        memory[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(memory))
    }

    pub fn as_bytes(&self) -> &Memory {
        &self.0
    }
}

impl TryFrom<&[u8]> for Image {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let memory: Memory = bytes.try_into().map_err(|_| Error::SizeMismatch {
            expected: MEMORY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(memory))
    }
}

/// One machine: its own registers and its own memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    registers: Registers,
    memory: Memory,
}

impl Cell {
    /// A cell nobody programmed: zeroed registers, memory full of INIT.
    pub fn fresh(init_opcode: u8) -> Self {
        Self::with_image(Image::filled(init_opcode))
    }

    pub fn with_image(image: Image) -> Self {
        Self {
            registers: Registers::default(),
            memory: image.0,
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn direction(&self) -> Direction {
        self.registers.t
    }

    /// The instruction the next step will execute.
    pub fn current_instruction<I: InstructionSet + ?Sized>(&self, isa: &I) -> Instruction {
        Instruction::fetch(isa, &self.memory, self.registers.p)
    }

    /// Evaluate one instruction. `target` is the memory of the slot the
    /// direction register selects (`None` if it is empty); it may be this
    /// cell's own memory.
    pub fn execute<I: InstructionSet + ?Sized>(&self, isa: &I, target: Option<&Memory>) -> Outcome {
        execute(isa, self.registers, &self.memory, target)
    }

    pub(crate) fn set_registers(&mut self, registers: Registers) {
        self.registers = registers;
    }

    pub(crate) fn apply(&mut self, write: Write) {
        if write.reset {
            self.registers.reset();
        }
        self.memory[write.address as usize] = write.value;
    }

    #[cfg(test)]
    pub(crate) fn with_registers(mut self, registers: Registers) -> Self {
        self.registers = registers;
        self
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.registers;
        write!(
            f,
            "<Cell: {:02X} {:02X} {:02X} {:02X}  {:02X}  {}>",
            r.a, r.x, r.y, r.z, r.p, r.t
        )
    }
}
