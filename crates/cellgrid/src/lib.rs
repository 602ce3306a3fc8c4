pub mod app;
pub mod demo;

use std::time::Duration;

use anyhow::Result;
use cellgrid_core::{Coord, Image, InstructionSet, Legacy, World};
use cellgrid_term::{App, TermContext, TermInitInfo};

pub use app::WorldApp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Canonical,
    Legacy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    Replicator,
    Bootstrap,
}

#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub width: usize,
    pub height: usize,
    /// Run forever when `None`.
    pub generations: Option<u64>,
    pub delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            generations: None,
            delay: Duration::from_millis(100),
        }
    }
}

const BOOTSTRAP_BYTES: &[u8] = &[0, 42, 4, 4, 4];

pub fn run(scenario: Scenario, encoding: Encoding, options: RunOptions) -> Result<()> {
    match encoding {
        Encoding::Canonical => {
            let world = World::new(options.width, options.height)?;
            run_world(world, scenario, options)?;
        }
        Encoding::Legacy => {
            let world = World::with_isa(options.width, options.height, Legacy)?;
            run_world(world, scenario, options)?;
        }
    }
    Ok(())
}

pub fn program<I: InstructionSet + ?Sized>(scenario: Scenario, isa: &I) -> Result<Image> {
    let image = match scenario {
        Scenario::Replicator => demo::replicator(isa)?,
        Scenario::Bootstrap => demo::bootstrap(isa, BOOTSTRAP_BYTES)?,
    };
    Ok(image)
}

fn run_world<I: InstructionSet>(mut world: World<I>, scenario: Scenario, options: RunOptions) -> Result<()> {
    let watch = Coord::new(world.width() / 2, world.height() / 2);
    let image = program(scenario, world.isa())?;
    world.seed(watch.x, watch.y, image)?;

    let app = WorldApp::new(world, watch);
    let init_info = TermInitInfo::builder()
        .title(app.title())
        .delay(options.delay)
        .max_frames(options.generations)
        .build();
    TermContext::run(init_info, app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::Canonical;

    #[test]
    fn replicator_needs_an_unconditional_branch() {
        assert!(program(Scenario::Replicator, &Canonical).is_ok());
        let err = program(Scenario::Replicator, &Legacy).unwrap_err();
        assert_eq!(err.to_string(), "BR has no encoding in the legacy instruction set");
    }

    #[test]
    fn bootstrap_assembles_for_both_encodings() {
        assert!(program(Scenario::Bootstrap, &Canonical).is_ok());
        assert!(program(Scenario::Bootstrap, &Legacy).is_ok());
    }

    #[test]
    fn bad_geometry_surfaces_as_an_error() {
        let options = RunOptions {
            width: 0,
            ..RunOptions::default()
        };
        let err = run(Scenario::Bootstrap, Encoding::Canonical, options).unwrap_err();
        assert_eq!(err.to_string(), "invalid grid geometry 0x9");
    }
}
