//! The growth engine: owns the canvas and the live branch agents and
//! advances them one generation at a time.
//!
//! A typical driver loop:
//! 1. [`GrowthEngine::new`] with a validated [`Config`].
//! 2. [`GrowthEngine::seed`] to paint the pot and plant the trunk.
//! 3. [`GrowthEngine::advance_step`] until it returns `false`, rendering
//!    [`GrowthEngine::grid`] between steps.

use crate::{
    agent::{BranchAgent, BranchKind},
    config::Config,
    error::ConfigError,
    grid::{Grid, RenderedCell},
    types::{Position, Style},
};
use rand::{SeedableRng, rngs::SmallRng};
use std::mem;
use tracing::{debug, info, trace};

/// The pot drawn under the trunk; spaces are left unpainted.
const POT: [&str; 2] = ["\\___/", " |_| "];

/// Columns between the pot's left edge and its centre.
const POT_HALF_WIDTH: i32 = 2;

/// Stochastic bonsai simulation.
///
/// Each engine owns its grid, agents and RNG; independent engines share
/// nothing.
#[derive(Debug)]
pub struct GrowthEngine {
    config: Config,
    grid: Grid,
    agents: Vec<BranchAgent>,
    /// Next generation, built during a step and swapped in at its end.
    next: Vec<BranchAgent>,
    rng: SmallRng,
    tick: u64,
}

impl GrowthEngine {
    /// Creates an engine with a blank grid and no agents.
    ///
    /// The RNG is seeded from `config.rng_seed`, or from a freshly drawn
    /// seed that is logged so the run can be replayed.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        debug!(seed, "Seeding growth engine RNG");
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Creates an engine that draws every random decision from `rng`.
    ///
    /// The injected `rng` takes precedence: `config.rng_seed` is kept in
    /// the config but not consulted here.
    pub fn with_rng(config: Config, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols);
        Ok(Self {
            config,
            grid,
            agents: Vec::new(),
            next: Vec::new(),
            rng,
            tick: 0,
        })
    }

    /// Paints the pot and plants the trunk one row above it.
    pub fn seed(&mut self) {
        let base_row = self.config.base_row();
        let base_col = self.config.base_col;
        self.draw_pot(base_row, base_col);

        let start = Position::new(base_col, base_row - 1);
        self.agents.push(BranchAgent::new(
            start,
            BranchKind::Trunk,
            self.config.life_start,
        ));
        debug!(
            x = start.x,
            y = start.y,
            life = self.config.life_start,
            "Planted trunk"
        );
    }

    fn draw_pot(&mut self, row: i32, col: i32) {
        for (dy, line) in POT.iter().enumerate() {
            for (dx, symbol) in line.chars().enumerate() {
                if symbol != ' ' {
                    self.grid.write(
                        row + dy as i32,
                        col - POT_HALF_WIDTH + dx as i32,
                        symbol,
                        Style::Pot,
                    );
                }
            }
        }
    }

    /// Advances every live agent by one tick.
    ///
    /// Survivors keep their order and each is followed by the agents it
    /// spawned. Once nothing is alive the call is a no-op returning
    /// `false`.
    ///
    /// ### Returns
    /// `true` while there are agents left to grow.
    pub fn advance_step(&mut self) -> bool {
        if self.agents.is_empty() {
            return false;
        }

        let mut spawned = 0;
        self.next.clear();
        for mut agent in self.agents.drain(..) {
            let outcome = agent.step(&mut self.grid, &self.config, &mut self.rng);
            spawned += outcome.spawned.len();
            if outcome.alive {
                self.next.push(agent);
            }
            self.next.extend(outcome.spawned);
        }
        mem::swap(&mut self.agents, &mut self.next);
        self.tick += 1;

        trace!(tick = self.tick, live = self.agents.len(), spawned, "Growth step");

        if self.agents.is_empty() {
            info!(
                ticks = self.tick,
                painted = self.grid.painted_cells(),
                "Bonsai finished growing"
            );
            return false;
        }
        true
    }

    /// Drops all agents and replaces the grid with a blank one.
    ///
    /// The configuration and the RNG stream are kept.
    pub fn reset(&mut self) {
        self.agents.clear();
        self.next.clear();
        self.grid = Grid::new(self.config.rows, self.config.cols);
        self.tick = 0;
        debug!("Growth engine reset");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shorthand for [`Grid::serialize`] on the current canvas.
    pub fn serialize(&self) -> Vec<Vec<RenderedCell>> {
        self.grid.serialize()
    }

    pub fn agents(&self) -> &[BranchAgent] {
        &self.agents
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Steps taken since the last seed or reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_finished(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn seeded(config: Config, seed: u64) -> GrowthEngine {
        GrowthEngine::with_rng(config, SmallRng::seed_from_u64(seed)).expect("valid config")
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = Config {
            leaf_symbols: Vec::new(),
            ..Config::default()
        };
        assert_eq!(
            GrowthEngine::new(cfg).err(),
            Some(ConfigError::EmptyLeafSymbols)
        );
    }

    #[test]
    fn new_rejects_base_column_far_off_the_grid() {
        for base_col in [i32::MAX, i32::MIN] {
            let cfg = Config {
                base_col,
                ..Config::default()
            };
            assert!(matches!(
                GrowthEngine::new(cfg),
                Err(ConfigError::BaseColumnOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn extreme_accepted_base_columns_grow_without_overflow() {
        for base_col in [-4096, 8192] {
            let cfg = Config {
                base_col,
                ..Config::default()
            };
            let mut engine = seeded(cfg, 12);
            engine.seed();
            while engine.advance_step() {}
            assert!(engine.grid().is_blank());
        }
    }

    #[test]
    fn injected_rng_takes_precedence_over_configured_seed() {
        let grow = |rng_seed| {
            let cfg = Config {
                rng_seed,
                ..Config::default()
            };
            let mut engine = seeded(cfg, 99);
            engine.seed();
            while engine.advance_step() {}
            engine.grid().clone()
        };

        assert_eq!(grow(Some(1)), grow(None));
        assert_eq!(grow(Some(1)), grow(Some(2)));
    }

    #[test]
    fn seed_draws_pot_and_plants_one_trunk() {
        let mut engine = seeded(Config::default(), 1);
        engine.seed();

        let grid = engine.grid();
        let pot = |row, col| grid.get(row, col).map(|c: Cell| (c.symbol, c.style));
        assert_eq!(pot(35, 13), Some(('\\', Style::Pot)));
        assert_eq!(pot(35, 14), Some(('_', Style::Pot)));
        assert_eq!(pot(35, 17), Some(('/', Style::Pot)));
        assert_eq!(pot(36, 13), None);
        assert_eq!(pot(36, 14), Some(('|', Style::Pot)));
        assert_eq!(pot(36, 15), Some(('_', Style::Pot)));
        assert_eq!(pot(36, 16), Some(('|', Style::Pot)));
        assert_eq!(grid.painted_cells(), 8);

        let agents = engine.agents();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].kind, BranchKind::Trunk);
        assert_eq!(agents[0].life, 38);
        assert_eq!(agents[0].pos, Position::new(15, 34));
    }

    #[test]
    fn advance_on_empty_engine_returns_false() {
        let mut engine = seeded(Config::default(), 2);
        assert!(!engine.advance_step());
        assert_eq!(engine.tick(), 0);
        assert!(engine.grid().is_blank());
    }

    #[test]
    fn first_step_paints_above_the_pot() {
        let mut engine = seeded(Config::default(), 3);
        engine.seed();
        assert!(engine.advance_step());

        let cell = engine.grid().get(34, 15).expect("trunk start painted");
        assert_eq!(cell.style, Style::Branch);
        assert!(matches!(cell.symbol, '|' | '/'));
        assert_eq!(engine.tick(), 1);
    }

    #[test]
    fn reset_clears_grid_and_agents_but_keeps_config() {
        let cfg = Config {
            life_start: 20,
            ..Config::default()
        };
        let mut engine = seeded(cfg.clone(), 4);
        engine.seed();
        for _ in 0..5 {
            engine.advance_step();
        }

        engine.reset();

        assert!(engine.grid().is_blank());
        assert!(engine.agents().is_empty());
        assert!(engine.is_finished());
        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.config(), &cfg);
    }

    #[test]
    fn same_seed_grows_the_same_tree() {
        let grow = |seed| {
            let mut engine = seeded(Config::default(), seed);
            engine.seed();
            while engine.advance_step() {}
            engine.grid().clone()
        };

        assert_eq!(grow(42), grow(42));
    }

    #[test]
    fn configured_seed_is_used_by_new() {
        let cfg = Config {
            rng_seed: Some(7),
            ..Config::default()
        };
        let mut a = GrowthEngine::new(cfg.clone()).expect("valid");
        let mut b = GrowthEngine::new(cfg).expect("valid");
        for engine in [&mut a, &mut b] {
            engine.seed();
            while engine.advance_step() {}
        }
        assert_eq!(a.grid(), b.grid());
    }
}
