use super::{Direction, EmptyRead, InstructionSet, Opcode, OPCODE_COUNT};

const TABLE: [Opcode; OPCODE_COUNT as usize] = [
    Opcode::Init, // 0
    Opcode::Set,  // 1
    Opcode::Rot,  // 2
    Opcode::In,   // 3
    Opcode::Out,  // 4
    Opcode::Add,  // 5
    Opcode::At,   // 6
    Opcode::BrEq, // 7
];

/// The older encoding: INIT is zero, `BR` only jumps when `x == y`, any
/// direction value outside `1..=4` means the cell itself, and reading an
/// empty slot brings the neighbor into existence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Legacy;

impl InstructionSet for Legacy {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn decode(&self, byte: u8) -> Opcode {
        TABLE[(byte % OPCODE_COUNT) as usize]
    }

    fn encode(&self, opcode: Opcode) -> Option<u8> {
        TABLE.iter().position(|&op| op == opcode).map(|i| i as u8)
    }

    fn init_opcode(&self) -> u8 {
        0
    }

    fn direction(&self, value: u8) -> Direction {
        match value {
            1 => Direction::North,
            2 => Direction::East,
            3 => Direction::South,
            4 => Direction::West,
            _ => Direction::Here,
        }
    }

    fn encode_direction(&self, direction: Direction) -> u8 {
        match direction {
            Direction::Here => 0,
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 3,
            Direction::West => 4,
        }
    }

    fn empty_read(&self) -> EmptyRead {
        EmptyRead::Materialize
    }
}
