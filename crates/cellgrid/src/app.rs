use cellgrid_core::{Coord, Instruction, InstructionSet, World};
use cellgrid_term::App;

/// Drives a world one generation per frame, following one cell in detail.
pub struct WorldApp<I: InstructionSet> {
    pub world: World<I>,
    watch: Coord,
}

impl<I: InstructionSet> WorldApp<I> {
    pub fn new(world: World<I>, watch: Coord) -> Self {
        Self { world, watch }
    }

    /// Grid map (`@` watched, `#` populated, `.` empty; north row on top),
    /// then the watched cell's registers and next instruction.
    pub fn render(&self, frame: &mut String) {
        let world = &self.world;
        for y in (0..world.height()).rev() {
            for x in 0..world.width() {
                let glyph = match world.cell(x, y) {
                    Some(_) if Coord::new(x, y) == self.watch => '@',
                    Some(_) => '#',
                    None => '.',
                };
                frame.push(glyph);
            }
            frame.push('\n');
        }

        frame.push_str(&format!("generation {}\n", world.generation()));
        if let Some(cell) = world.cell(self.watch.x, self.watch.y) {
            frame.push_str(&format!("{}\n", cell));
            frame.push_str(&format!("{}\n", cell.current_instruction(world.isa())));
        }
    }

    /// Disassembly of the watched cell's program, one instruction per line.
    pub fn listing(&self) -> Option<String> {
        let isa = self.world.isa();
        let cell = self.world.cell(self.watch.x, self.watch.y)?;
        let lines: Vec<String> = Instruction::listing(isa, cell.memory(), isa.init_opcode())
            .into_iter()
            .map(|(addr, insn)| format!("{:02X}: {}", addr, insn))
            .collect();
        Some(lines.join("\n"))
    }
}

impl<I: InstructionSet> App for WorldApp<I> {
    fn init(&mut self) {
        log::info!(
            "{}x{} world, {} encoding, {} populated",
            self.world.width(),
            self.world.height(),
            self.world.isa().name(),
            self.world.populated().count()
        );
        if let Some(listing) = self.listing() {
            log::debug!("watched cell {:?}:\n{}", self.watch, listing);
        }
    }

    fn update(&mut self, frame: &mut String) {
        self.render(frame);
        let report = self.world.step();
        if report.materialized > 0 {
            log::info!(
                "generation {}: {} new cell(s)",
                report.generation,
                report.materialized
            );
        }
    }

    fn should_exit(&self) -> bool {
        self.world.populated().next().is_none()
    }

    fn exit(&mut self) {
        log::info!("stopped after {} generations", self.world.generation());
    }

    fn title(&self) -> String {
        format!("Cellgrid ({})", self.world.isa().name())
    }
}
