use proptest::prelude::*;

use super::*;
use crate::cell::Registers;
use crate::isa::{Assembler, Direction, Legacy};

const INIT: u8 = 7;

fn image(asm: Assembler<'_, Canonical>) -> Image {
    asm.finish().unwrap()
}

fn asm() -> Assembler<'static, Canonical> {
    Assembler::new(&Canonical)
}

fn all_slots_empty_except<I: InstructionSet>(world: &World<I>, populated: &[(usize, usize)]) -> bool {
    world
        .grid()
        .iter()
        .all(|(c, slot)| slot.is_populated() == populated.contains(&(c.x, c.y)))
}

#[test]
fn rejects_degenerate_geometry() {
    assert_eq!(
        World::new(0, 3).err(),
        Some(Error::InvalidGeometry {
            width: 0,
            height: 3
        })
    );
    assert_eq!(
        World::new(3, 0).err(),
        Some(Error::InvalidGeometry {
            width: 3,
            height: 0
        })
    );
    assert!(World::new(usize::MAX, 2).is_err());
}

#[test]
fn rejects_geometry_too_large_to_allocate() {
    assert_eq!(
        World::new(usize::MAX, 1).err(),
        Some(Error::InvalidGeometry {
            width: usize::MAX,
            height: 1
        })
    );
    assert!(World::new(1, usize::MAX / 2).is_err());
}

#[test]
fn seed_checks_bounds_and_occupancy() {
    let mut world = World::new(3, 2).unwrap();
    assert_eq!(
        world.seed(3, 0, Image::filled(INIT)),
        Err(Error::OutOfBounds {
            x: 3,
            y: 0,
            width: 3,
            height: 2
        })
    );
    world.seed(2, 1, Image::filled(INIT)).unwrap();
    assert_eq!(
        world.seed(2, 1, Image::filled(INIT)),
        Err(Error::Occupied { x: 2, y: 1 })
    );
    assert_eq!(
        world.seed_padded(0, 0, &[0; 300]),
        Err(Error::SizeMismatch {
            expected: 256,
            actual: 300
        })
    );
}

#[test]
fn seeded_cell_starts_zeroed() {
    let mut world = World::new(2, 2).unwrap();
    world.seed_padded(1, 0, &[0, 1]).unwrap();
    let cell = world.cell(1, 0).unwrap();
    assert_eq!(*cell.registers(), Registers::default());
    assert_eq!(&cell.memory()[..3], &[0, 1, INIT]);
    assert_eq!(world.populated().count(), 1);
}

#[test]
fn targeting_wraps_on_every_edge() {
    let world = World::new(4, 3).unwrap();
    let grid = world.grid();
    assert_eq!(grid.target(Coord::new(1, 2), Direction::North), Coord::new(1, 0));
    assert_eq!(grid.target(Coord::new(1, 0), Direction::South), Coord::new(1, 2));
    assert_eq!(grid.target(Coord::new(0, 1), Direction::West), Coord::new(3, 1));
    assert_eq!(grid.target(Coord::new(3, 1), Direction::East), Coord::new(0, 1));
    assert_eq!(grid.target(Coord::new(2, 1), Direction::Here), Coord::new(2, 1));
    assert_eq!(grid.target(Coord::new(2, 1), Direction::North), Coord::new(2, 2));
}

#[test]
fn stepping_an_empty_world_is_a_no_op() {
    let mut world = World::new(3, 3).unwrap();
    let report = world.step();
    assert_eq!(
        report,
        StepReport {
            generation: 1,
            executed: 0,
            writes: 0,
            materialized: 0,
        }
    );
    assert!(all_slots_empty_except(&world, &[]));
}

#[test]
fn reads_see_the_previous_generation() {
    let mut world = World::new(2, 1).unwrap();
    // A: t=EAST, x=5, a=10, OUT in generation 6.
    world
        .seed(0, 0, image(asm().set(2).at().set(5).rot().set(10).output()))
        .unwrap();
    // B: t=SELF, x=5, IN in generation 6. Its own address 5 holds 0.
    world
        .seed(1, 0, image(asm().set(5).rot().set(0).set(0).set(0).input()))
        .unwrap();
    assert_eq!(world.cell(1, 0).unwrap().memory()[5], 0);

    world.run(6);

    let b = world.cell(1, 0).unwrap();
    assert_eq!(b.registers().a, 0);
    assert_eq!(b.memory()[5], 10);
}

#[test]
fn self_writes_are_invisible_to_same_generation_reads() {
    let mut world = World::new(2, 1).unwrap();
    // A writes 99 over its own address 3 (currently 3) in generation 5.
    world
        .seed(0, 0, image(asm().set(0).set(3).rot().set(99).output()))
        .unwrap();
    // B looks WEST at A's address 3 in generation 5.
    world
        .seed(1, 0, image(asm().set(4).at().set(3).rot().input()))
        .unwrap();
    assert_eq!(world.cell(0, 0).unwrap().memory()[3], 3);

    world.run(5);

    assert_eq!(world.cell(1, 0).unwrap().registers().a, 3);
    assert_eq!(world.cell(0, 0).unwrap().memory()[3], 99);
}

#[test]
fn last_writer_in_scan_order_wins() {
    let mut world = World::new(3, 1).unwrap();
    world
        .seed(0, 0, image(asm().set(2).at().set(5).rot().set(11).output()))
        .unwrap();
    world
        .seed(2, 0, image(asm().set(4).at().set(5).rot().set(22).output()))
        .unwrap();

    world.run(5);
    let report = world.step();

    assert_eq!(report.writes, 2);
    assert_eq!(report.materialized, 1);
    assert_eq!(world.cell(1, 0).unwrap().memory()[5], 22);
}

#[test]
fn out_materializes_an_empty_neighbor() {
    let mut world = World::new(3, 3).unwrap();
    let writer = Cell::with_image(Image::padded(&[3], INIT).unwrap()).with_registers(Registers {
        a: 42,
        x: 9,
        t: Direction::North,
        ..Registers::default()
    });
    world.place(1, 1, writer);
    assert!(all_slots_empty_except(&world, &[(1, 1)]));

    let report = world.step();

    assert_eq!(report.materialized, 1);
    assert!(all_slots_empty_except(&world, &[(1, 1), (1, 2)]));
    let child = world.cell(1, 2).unwrap();
    assert_eq!(*child.registers(), Registers::default());
    for (addr, &byte) in child.memory().iter().enumerate() {
        assert_eq!(byte, if addr == 9 { 42 } else { INIT }, "address {addr}");
    }
}

#[test]
fn materialized_cells_first_run_next_generation() {
    let mut world = World::new(3, 3).unwrap();
    let writer = Cell::with_image(Image::padded(&[3], INIT).unwrap()).with_registers(Registers {
        t: Direction::North,
        ..Registers::default()
    });
    world.place(1, 1, writer);

    assert_eq!(world.step().executed, 1);
    assert_eq!(world.step().executed, 2);
}

#[test]
fn in_from_an_empty_slot_reads_init() {
    let mut world = World::new(3, 3).unwrap();
    let reader = Cell::with_image(Image::padded(&[2], INIT).unwrap()).with_registers(Registers {
        a: 1,
        t: Direction::East,
        ..Registers::default()
    });
    world.place(1, 1, reader);

    let report = world.step();

    assert_eq!(world.cell(1, 1).unwrap().registers().a, INIT);
    assert_eq!(report.materialized, 0);
    assert!(all_slots_empty_except(&world, &[(1, 1)]));
}

#[test]
fn legacy_in_from_an_empty_slot_materializes_it() {
    let mut world = World::with_isa(3, 3, Legacy).unwrap();
    let reader = Cell::with_image(Image::padded(&[3], 0).unwrap()).with_registers(Registers {
        a: 1,
        t: Direction::East,
        ..Registers::default()
    });
    world.place(1, 1, reader);

    world.step();

    assert_eq!(world.cell(1, 1).unwrap().registers().a, 0);
    let created = world.cell(2, 1).unwrap();
    assert!(created.memory().iter().all(|&b| b == 0));
}

#[test]
fn init_resets_the_target_at_commit() {
    let mut world = World::new(2, 1).unwrap();
    let initializer = Cell::with_image(Image::padded(&[INIT], INIT).unwrap()).with_registers(Registers {
        t: Direction::East,
        ..Registers::default()
    });
    let victim = Cell::with_image(Image::filled(1)).with_registers(Registers {
        a: 1,
        x: 2,
        y: 3,
        z: 4,
        p: 10,
        t: Direction::North,
    });
    world.place(0, 0, initializer);
    world.place(1, 0, victim);

    world.step();

    let victim = world.cell(1, 0).unwrap();
    assert_eq!(*victim.registers(), Registers::default());
    assert_eq!(victim.memory()[0], INIT);
    assert_eq!(victim.memory()[1], 1);
    assert_eq!(world.cell(0, 0).unwrap().registers().p, 1);
}

#[test]
fn init_on_self_restarts_the_program() {
    let mut world = World::new(1, 1).unwrap();
    world.seed(0, 0, image(asm().set(9).rot().init())).unwrap();
    world.run(3);
    let cell = world.cell(0, 0).unwrap();
    assert_eq!(*cell.registers(), Registers::default());
    assert_eq!(cell.memory()[0], INIT);
    assert_eq!(world.generation(), 3);
}

#[test]
fn parent_bootstraps_north_neighbor() {
    let bootstrap = [0u8, 42, 4];
    let mut program = asm().set(1).at().init();
    for (offset, &byte) in bootstrap.iter().enumerate() {
        program = program.set(offset as u8 + 1).rot().set(byte).output();
    }
    let mut world = World::new(3, 3).unwrap();
    world.seed(1, 1, image(program)).unwrap();

    world.run(2);
    assert!(!world.slot(1, 2).unwrap().is_populated());
    world.step();
    assert!(world.slot(1, 2).unwrap().is_populated());

    world.run(11);
    assert_eq!(world.cell(1, 2).unwrap().memory()[3], INIT);
    world.step();

    let child = world.cell(1, 2).unwrap();
    assert_eq!(child.memory()[0], INIT);
    assert_eq!(&child.memory()[1..4], &bootstrap);
    assert!(all_slots_empty_except(&world, &[(1, 1), (1, 2)]));
}

fn any_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn targets_stay_on_the_grid(
        width in 1usize..12,
        height in 1usize..12,
        x in 0usize..12,
        y in 0usize..12,
        direction in any_direction(),
    ) {
        let world = World::new(width, height).unwrap();
        let from = Coord::new(x % width, y % height);
        let to = world.grid().target(from, direction);
        prop_assert!(world.grid().contains(to));

        let back = match direction {
            Direction::Here => Direction::Here,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        };
        prop_assert_eq!(world.grid().target(to, back), from);
    }

    #[test]
    fn random_programs_keep_the_world_consistent(
        width in 1usize..5,
        height in 1usize..5,
        seeds in prop::collection::vec(
            (0usize..5, 0usize..5, prop::collection::vec(any::<u8>(), 0..=256)),
            1..4,
        ),
        steps in 1usize..48,
        legacy in any::<bool>(),
    ) {
        if legacy {
            let mut world = World::with_isa(width, height, Legacy).unwrap();
            check_random_run(&mut world, &seeds, steps)?;
        } else {
            let mut world = World::new(width, height).unwrap();
            check_random_run(&mut world, &seeds, steps)?;
        }
    }
}

fn check_random_run<I: InstructionSet>(
    world: &mut World<I>,
    seeds: &[(usize, usize, Vec<u8>)],
    steps: usize,
) -> std::result::Result<(), TestCaseError> {
    for (x, y, bytes) in seeds {
        let (x, y) = (x % world.width(), y % world.height());
        if world.cell(x, y).is_none() {
            world.seed_padded(x, y, bytes).unwrap();
        }
    }

    for _ in 0..steps {
        let before = world.populated().count();
        let report = world.step();
        let after = world.populated().count();

        prop_assert_eq!(report.executed, before);
        prop_assert!(report.writes <= report.executed);
        prop_assert_eq!(after, before + report.materialized);
        prop_assert!(after <= world.width() * world.height());
    }
    prop_assert_eq!(world.generation(), steps as u64);
    Ok(())
}
