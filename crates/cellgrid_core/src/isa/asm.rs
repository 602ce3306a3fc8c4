use super::{InstructionSet, Opcode};
use crate::cell::Image;
use crate::error::{Error, Result};

/// Builds a program image for a given encoding.
///
/// ```
/// use cellgrid_core::{Assembler, Canonical};
///
/// let image = Assembler::new(&Canonical).set(1).at().init().finish().unwrap();
/// assert_eq!(&image.as_bytes()[..4], &[0, 1, 5, 7]);
/// ```
pub struct Assembler<'a, I: InstructionSet + ?Sized> {
    isa: &'a I,
    bytes: Vec<u8>,
    error: Option<Error>,
}

impl<'a, I: InstructionSet + ?Sized> Assembler<'a, I> {
    pub fn new(isa: &'a I) -> Self {
        Self {
            isa,
            bytes: Vec::new(),
            error: None,
        }
    }

    /// Address the next emitted byte will land at.
    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    pub fn op(mut self, opcode: Opcode) -> Self {
        match self.isa.encode(opcode) {
            Some(byte) => self.bytes.push(byte),
            None if self.error.is_none() => {
                self.error = Some(Error::Unencodable {
                    opcode,
                    isa: self.isa.name(),
                });
            }
            None => {}
        }
        self
    }

    pub fn byte(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    pub fn set(self, value: u8) -> Self {
        self.op(Opcode::Set).byte(value)
    }

    pub fn rot(self) -> Self {
        self.op(Opcode::Rot)
    }

    pub fn input(self) -> Self {
        self.op(Opcode::In)
    }

    pub fn output(self) -> Self {
        self.op(Opcode::Out)
    }

    pub fn add(self) -> Self {
        self.op(Opcode::Add)
    }

    pub fn at(self) -> Self {
        self.op(Opcode::At)
    }

    pub fn br(self) -> Self {
        self.op(Opcode::Br)
    }

    pub fn br_eq(self) -> Self {
        self.op(Opcode::BrEq)
    }

    pub fn init(self) -> Self {
        self.op(Opcode::Init)
    }

    pub fn rot_n(self, n: usize) -> Self {
        (0..n).fold(self, |asm, _| asm.rot())
    }

    /// `SET k; BR` landing on `target`. Clobbers `a`.
    pub fn jump_to(self, target: usize) -> Self {
        let after = self.position() + 3;
        let offset = (target as isize - after as isize).rem_euclid(256) as u8;
        self.set(offset).br()
    }

    /// Raw bytes emitted so far, unpadded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pad with the encoding's INIT opcode up to a full image.
    pub fn finish(self) -> Result<Image> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Image::padded(&self.bytes, self.isa.init_opcode())
    }
}
