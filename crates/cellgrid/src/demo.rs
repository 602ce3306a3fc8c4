//! Programs the launcher seeds into an empty world.

use cellgrid_core::{Assembler, Direction, Image, InstructionSet, Result};

/// Copies its own memory into the cell to the south, one byte every 18
/// generations, starting at address 1 and finishing with address 0.
///
/// A freshly materialized child keeps executing INIT at address 0 and
/// rewriting that address, so address 0 has to arrive last: once it
/// does, the child starts running the complete copy.
pub fn replicator<I: InstructionSet + ?Sized>(isa: &I) -> Result<Image> {
    let south = isa.encode_direction(Direction::South);
    let here = isa.encode_direction(Direction::Here);

    // x = 1
    let asm = Assembler::new(isa).set(1).rot();
    let top = asm.position();
    asm
        // a = memory[x]; (a, x) = (byte, x) with t = SOUTH
        .input()
        .rot()
        .set(south)
        .at()
        .rot_n(3)
        .output()
        // back to SELF; x += 1
        .set(here)
        .at()
        .rot_n(2)
        .set(1)
        .rot()
        .add()
        .rot()
        .jump_to(top)
        .finish()
}

/// INIT the northern neighbor, then write `bytes` to its addresses 1, 2, ...
/// One byte every four generations after the first three.
pub fn bootstrap<I: InstructionSet + ?Sized>(isa: &I, bytes: &[u8]) -> Result<Image> {
    let north = isa.encode_direction(Direction::North);
    let asm = Assembler::new(isa).set(north).at().init();
    bytes
        .iter()
        .zip(1u8..)
        .fold(asm, |asm, (&byte, addr)| asm.set(addr).rot().set(byte).output())
        .finish()
}
