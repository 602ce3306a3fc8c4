use super::{EmptyRead, InstructionSet, Opcode};
use crate::cell::Registers;
use crate::Memory;

/// A memory mutation aimed at the executing cell's target, applied only
/// once every cell of the generation has been evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Write {
    pub address: u8,
    pub value: u8,
    /// Zero the target's registers before storing (INIT).
    pub reset: bool,
}

impl Write {
    pub const fn store(address: u8, value: u8) -> Self {
        Self {
            address,
            value,
            reset: false,
        }
    }

    pub const fn reset(init_opcode: u8) -> Self {
        Self {
            address: 0,
            value: init_opcode,
            reset: true,
        }
    }
}

/// Result of evaluating one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub opcode: Opcode,
    /// The executing cell's registers after the instruction.
    pub registers: Registers,
    pub write: Option<Write>,
    /// The target slot must hold a cell once the generation commits.
    pub touch: bool,
}

/// Fetch, decode and execute the instruction at `registers.p`.
///
/// Nothing is mutated: the new register file is returned and any effect on
/// the target comes back as a [`Write`]. `target` is the memory of the slot
/// the direction register selects, or `None` when that slot is empty.
pub fn execute<I: InstructionSet + ?Sized>(
    isa: &I,
    registers: Registers,
    memory: &Memory,
    target: Option<&Memory>,
) -> Outcome {
    let mut regs = registers;
    let opcode = isa.decode(memory[regs.p as usize]);
    regs.p = regs.p.wrapping_add(1);

    let mut write = None;
    let mut touch = false;

    match opcode {
        Opcode::Set => {
            regs.a = memory[regs.p as usize];
            regs.p = regs.p.wrapping_add(1);
        }
        Opcode::Rot => {
            (regs.a, regs.x, regs.y, regs.z) = (regs.z, regs.a, regs.x, regs.y);
        }
        Opcode::In => match target {
            Some(target) => regs.a = target[regs.x as usize],
            None => {
                regs.a = isa.init_opcode();
                touch = isa.empty_read() == EmptyRead::Materialize;
            }
        },
        Opcode::Out => {
            write = Some(Write::store(regs.x, regs.a));
            touch = true;
        }
        Opcode::Add => regs.a = regs.a.wrapping_add(regs.x),
        Opcode::At => regs.t = isa.direction(regs.a),
        Opcode::Br => regs.p = regs.p.wrapping_add(regs.a),
        Opcode::BrEq => {
            if regs.x == regs.y {
                regs.p = regs.p.wrapping_add(regs.a);
            }
        }
        Opcode::Init => {
            write = Some(Write::reset(isa.init_opcode()));
            touch = true;
        }
    }

    Outcome {
        opcode,
        registers: regs,
        write,
        touch,
    }
}
