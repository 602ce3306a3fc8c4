use super::{Coord, Slot, World};
use crate::cell::Registers;
use crate::isa::{InstructionSet, Write};

/// A deferred mutation of the cell at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingWrite {
    pub target: Coord,
    pub write: Write,
}

/// What one generation did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number just committed, starting at 1.
    pub generation: u64,
    /// Cells that executed an instruction.
    pub executed: usize,
    /// Pending writes applied during commit.
    pub writes: usize,
    /// Slots that went from empty to populated.
    pub materialized: usize,
}

/// Everything generation `n` decided, held until every populated cell has
/// been evaluated against the memory committed by generation `n - 1`.
///
/// Only `World::evaluate` builds one and only `World::commit` consumes
/// it, so no commit of a generation can begin before all of its evaluates
/// are finished. Evaluate borrows the world immutably; a parallel evaluate
/// would keep that shape.
#[must_use]
#[derive(Debug, Default)]
struct Evaluation {
    registers: Vec<(Coord, Registers)>,
    touched: Vec<Coord>,
    writes: Vec<PendingWrite>,
}

impl<I: InstructionSet> World<I> {
    /// Advance exactly one generation.
    pub fn step(&mut self) -> StepReport {
        let evaluation = self.evaluate();
        self.commit(evaluation)
    }

    fn evaluate(&self) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for (coord, slot) in self.grid.iter() {
            let Slot::Populated(cell) = slot else {
                continue;
            };
            let target = self.grid.target(coord, cell.direction());
            let target_memory = self.grid.cell(target).map(|c| c.memory());
            let outcome = cell.execute(&self.isa, target_memory);

            evaluation.registers.push((coord, outcome.registers));
            if outcome.touch && target_memory.is_none() {
                evaluation.touched.push(target);
            }
            if let Some(write) = outcome.write {
                evaluation.writes.push(PendingWrite { target, write });
            }
        }
        evaluation
    }

    /// Apply register updates, then create touched cells, then apply the
    /// pending writes in scan order. Two writes to the same address in one
    /// generation: the later cell in scan order wins.
    fn commit(&mut self, evaluation: Evaluation) -> StepReport {
        let Evaluation {
            registers,
            touched,
            writes,
        } = evaluation;

        for &(coord, regs) in &registers {
            if let Some(cell) = self.grid.cell_mut(coord) {
                cell.set_registers(regs);
            }
        }

        let init_opcode = self.isa.init_opcode();
        let mut materialized = 0;
        for coord in touched {
            let created = self
                .grid
                .slot_mut(coord)
                .is_some_and(|slot| slot.materialize(init_opcode));
            if created {
                log::debug!("materialized cell at ({}, {})", coord.x, coord.y);
                materialized += 1;
            }
        }

        for pending in &writes {
            if let Some(cell) = self.grid.cell_mut(pending.target) {
                cell.apply(pending.write);
            }
        }

        self.generation += 1;
        let report = StepReport {
            generation: self.generation,
            executed: registers.len(),
            writes: writes.len(),
            materialized,
        };
        log::trace!("{:?}", report);
        report
    }
}
