use thiserror::Error;

use crate::isa::Opcode;

/// Construction-time failures. Once a [`World`](crate::World) exists,
/// stepping it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("program image is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("invalid grid geometry {width}x{height}")]
    InvalidGeometry { width: usize, height: usize },

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("slot ({x}, {y}) is already populated")]
    Occupied { x: usize, y: usize },

    #[error("{opcode} has no encoding in the {isa} instruction set")]
    Unencodable { opcode: Opcode, isa: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
