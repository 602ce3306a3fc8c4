use super::{Direction, EmptyRead, InstructionSet, Opcode, OPCODE_COUNT};

const TABLE: [Opcode; OPCODE_COUNT as usize] = [
    Opcode::Set,  // 0
    Opcode::Rot,  // 1
    Opcode::In,   // 2
    Opcode::Out,  // 3
    Opcode::Add,  // 4
    Opcode::At,   // 5
    Opcode::Br,   // 6
    Opcode::Init, // 7
];

/// The reference encoding: unconditional `BR`, `direction = a mod 5`, and
/// reads from empty slots return INIT without creating anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Canonical;

impl InstructionSet for Canonical {
    fn name(&self) -> &'static str {
        "canonical"
    }

    fn decode(&self, byte: u8) -> Opcode {
        TABLE[(byte % OPCODE_COUNT) as usize]
    }

    fn encode(&self, opcode: Opcode) -> Option<u8> {
        TABLE.iter().position(|&op| op == opcode).map(|i| i as u8)
    }

    fn init_opcode(&self) -> u8 {
        7
    }

    fn direction(&self, value: u8) -> Direction {
        Direction::ALL[(value % Direction::ALL.len() as u8) as usize]
    }

    fn encode_direction(&self, direction: Direction) -> u8 {
        Direction::ALL
            .iter()
            .position(|&d| d == direction)
            .map_or(0, |i| i as u8)
    }

    fn empty_read(&self) -> EmptyRead {
        EmptyRead::AsInit
    }
}
