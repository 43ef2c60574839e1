use bonsai_core::{BranchKind, Config, GrowthEngine, Style};
use rand::{SeedableRng, rngs::SmallRng};

fn seeded_engine(config: Config, seed: u64) -> GrowthEngine {
    GrowthEngine::with_rng(config, SmallRng::seed_from_u64(seed)).expect("valid config")
}

/// Grows to completion and returns the number of steps taken.
fn grow(engine: &mut GrowthEngine, limit: u64) -> u64 {
    engine.seed();
    while engine.advance_step() {
        assert!(engine.tick() <= limit, "still growing after {limit} steps");
    }
    engine.tick()
}

#[test]
fn growth_terminates_within_trunk_life() {
    let configs = [
        Config::default(),
        Config {
            life_start: 80,
            multiplier: 40.0,
            ..Config::default()
        },
        Config {
            life_start: 5,
            multiplier: 0.0,
            ..Config::default()
        },
    ];

    for cfg in configs {
        let bound = u64::from(cfg.life_start) + 1;
        for seed in 0..20 {
            let mut engine = seeded_engine(cfg.clone(), seed);
            let steps = grow(&mut engine, bound);
            assert!(steps <= bound);
            assert!(engine.is_finished());
        }
    }
}

#[test]
fn tiny_and_offset_grids_clamp_every_write() {
    let configs = [
        Config {
            rows: 1,
            cols: 1,
            ..Config::default()
        },
        Config {
            rows: 4,
            cols: 4,
            base_col: 0,
            ..Config::default()
        },
        Config {
            rows: 10,
            cols: 10,
            base_col: -100,
            ..Config::default()
        },
    ];

    for cfg in configs {
        let mut engine = seeded_engine(cfg.clone(), 9);
        grow(&mut engine, u64::from(cfg.life_start) + 1);

        let rows = engine.serialize();
        assert_eq!(rows.len(), cfg.rows);
        assert!(rows.iter().all(|r| r.len() == cfg.cols));
        assert!(engine.grid().painted_cells() <= cfg.rows * cfg.cols);
    }

    // Entirely off-canvas growth leaves the grid untouched.
    let cfg = Config {
        rows: 10,
        cols: 10,
        base_col: -100,
        ..Config::default()
    };
    let mut engine = seeded_engine(cfg, 11);
    grow(&mut engine, 39);
    assert!(engine.grid().is_blank());
}

#[test]
fn finished_engine_stays_finished() {
    let mut engine = seeded_engine(Config::default(), 3);
    grow(&mut engine, 39);

    let snapshot = engine.grid().clone();
    let ticks = engine.tick();
    for _ in 0..5 {
        assert!(!engine.advance_step());
    }
    assert_eq!(engine.grid(), &snapshot);
    assert_eq!(engine.tick(), ticks);
}

#[test]
fn reset_then_seed_matches_a_fresh_engine() {
    let mut used = seeded_engine(Config::default(), 5);
    grow(&mut used, 39);
    used.reset();
    assert!(used.grid().is_blank());

    let mut fresh = seeded_engine(Config::default(), 6);
    used.seed();
    fresh.seed();

    assert_eq!(used.grid(), fresh.grid());
    assert_eq!(used.agents(), fresh.agents());
    assert_eq!(used.tick(), 0);

    while used.advance_step() {}
    assert!(used.grid().painted_cells() > fresh.grid().painted_cells());
}

#[test]
fn single_tick_trunk_leaves_only_leaf_markers() {
    let cfg = Config {
        life_start: 1,
        multiplier: 0.0,
        ..Config::default()
    };

    for seed in 0..20 {
        let mut engine = seeded_engine(cfg.clone(), seed);
        engine.seed();
        let pot_cells = engine.grid().painted_cells();

        engine.advance_step();

        // Exactly one glyph at the trunk start, nothing else painted yet.
        assert_eq!(engine.grid().painted_cells(), pot_cells + 1);
        let start = engine.grid().get(34, 15).expect("trunk start painted");
        assert_eq!(start.style, Style::Leaf);

        // No shoots: anything still alive is a one-tick leaf marker.
        assert!(
            engine
                .agents()
                .iter()
                .all(|a| a.kind == BranchKind::Dead && a.life == 1)
        );

        assert!(!engine.advance_step());
        assert!(!engine.advance_step());
    }
}

#[test]
fn default_tree_has_wood_leaves_and_pot() {
    let mut engine = seeded_engine(Config::default(), 2024);
    grow(&mut engine, 39);

    let styles: Vec<Style> = engine
        .serialize()
        .into_iter()
        .flatten()
        .filter_map(|c| c.style)
        .collect();
    for style in [Style::Branch, Style::Leaf, Style::Pot] {
        assert!(styles.contains(&style), "missing {style:?}");
    }

    let markup = engine.grid().to_markup();
    assert_eq!(markup.lines().count(), 38);
    assert!(markup.contains("<span class=\"pot\">"));
}
