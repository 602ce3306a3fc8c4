use std::fmt;

use super::{InstructionSet, Opcode};
use crate::Memory;

/// An opcode together with its immediate, as it sits in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub immediate: Option<u8>,
}

impl Instruction {
    /// Decode the instruction at `p` without executing it.
    pub fn fetch<I: InstructionSet + ?Sized>(isa: &I, memory: &Memory, p: u8) -> Self {
        let opcode = isa.decode(memory[p as usize]);
        let immediate = match opcode {
            Opcode::Set => Some(memory[p.wrapping_add(1) as usize]),
            _ => None,
        };
        Self { opcode, immediate }
    }

    /// Linear listing of `memory` from address 0, stopping after the last
    /// byte that differs from `fill`.
    pub fn listing<I: InstructionSet + ?Sized>(isa: &I, memory: &Memory, fill: u8) -> Vec<(u8, Self)> {
        let end = memory
            .iter()
            .rposition(|&byte| byte != fill)
            .map_or(0, |last| last + 1);
        let mut listing = Vec::new();
        let mut addr = 0usize;
        while addr < end {
            let insn = Self::fetch(isa, memory, addr as u8);
            listing.push((addr as u8, insn));
            addr += insn.opcode.width() as usize;
        }
        listing
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.immediate {
            Some(imm) => write!(f, "{} {}", self.opcode, imm),
            None => write!(f, "{}", self.opcode),
        }
    }
}
