//! Branch agents: the growing tips of the bonsai.
//!
//! Every live [`BranchAgent`] paints one glyph per tick, moves by a delta
//! drawn from its kind's [`DeltaTable`], and may spawn children according
//! to the spawn rules in [`BranchAgent::step`].

use crate::{
    config::{Config, DEFAULT_LEAF_SYMBOLS},
    grid::Grid,
    types::{Position, Style},
};
use glam::IVec2;
use rand::{Rng, seq::IndexedRandom};

/// Below this remaining life an agent paints leaves instead of wood.
pub const LEAF_LIFE_THRESHOLD: u32 = 4;

const TRUNK_SPAWN_MIN_AGE: u32 = 5;
const TRUNK_SPAWN_MIN_LIFE: u32 = 8;
const TRUNK_SPAWN_BASE_RATE: f64 = 0.15;
const TRUNK_SHOOT_COOLDOWN: u32 = 3;
const RIGHT_SHOOT_BIAS: f64 = 0.55;
const SHOOT_LIFE_MIN_FRACTION: f64 = 0.4;
const SHOOT_LIFE_MAX_FRACTION: f64 = 0.7;

const SHOOT_BRANCH_MIN_AGE: u32 = 3;
const SHOOT_BRANCH_MIN_LIFE: u32 = 6;
const SHOOT_BRANCH_CHANCE: f64 = 0.1;
const SHOOT_BRANCH_LIFE_FRACTION: f64 = 0.5;

const LEAF_CLUSTER_LIFE: u32 = 5;
const LEAF_CLUSTER_TRIALS: usize = 3;
const LEAF_CLUSTER_CHANCE: f64 = 0.5;

const DYING_LIFE: u32 = 8;
const DYING_CHANCE: f64 = 0.3;

/// Trunk ticks spent growing nearly straight up before the rightward lean.
const TRUNK_YOUNG_AGE: u32 = 4;

/// Growth phase of an agent. Selects its direction table and spawn rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Trunk,
    ShootLeft,
    ShootRight,
    Dying,
    /// Terminal leaf marker; never moves.
    Dead,
}

impl BranchKind {
    pub fn is_shoot(self) -> bool {
        matches!(self, BranchKind::ShootLeft | BranchKind::ShootRight)
    }

    /// Direction table for an agent of this kind at the given age.
    ///
    /// `Dead` agents have no table: they stay where they were spawned.
    pub fn delta_table(self, age: u32) -> Option<&'static DeltaTable> {
        match self {
            BranchKind::Trunk if age < TRUNK_YOUNG_AGE => Some(&TRUNK_YOUNG),
            BranchKind::Trunk => Some(&TRUNK_MATURE),
            BranchKind::ShootLeft => Some(&SHOOT_LEFT),
            BranchKind::ShootRight => Some(&SHOOT_RIGHT),
            BranchKind::Dying => Some(&DYING),
            BranchKind::Dead => None,
        }
    }
}

/// Distribution of one axis as cumulative thresholds over a uniform draw.
///
/// The first `(threshold, value)` pair whose threshold is above the draw
/// wins; `fallback` covers the rest of `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTable {
    pub steps: &'static [(f64, i32)],
    pub fallback: i32,
}

impl AxisTable {
    /// An axis that always yields `value`.
    pub const fn fixed(value: i32) -> Self {
        Self {
            steps: &[],
            fallback: value,
        }
    }

    pub fn pick(&self, u: f64) -> i32 {
        self.steps
            .iter()
            .find(|&&(threshold, _)| u < threshold)
            .map_or(self.fallback, |&(_, value)| value)
    }
}

/// Direction distribution for one branch kind.
///
/// Both axes read the *same* uniform draw, so they are correlated: a shoot
/// that steps upward is always also stepping sideways.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaTable {
    pub dx: AxisTable,
    pub dy: AxisTable,
}

impl DeltaTable {
    /// Maps a draw `u` in `[0, 1)` to a `(dx, dy)` step.
    pub fn delta_for(&self, u: f64) -> IVec2 {
        IVec2::new(self.dx.pick(u), self.dy.pick(u))
    }

    pub fn sample(&self, rng: &mut impl Rng) -> IVec2 {
        self.delta_for(rng.random::<f64>())
    }
}

/// Young trunk: straight up with a slight rightward lean.
pub const TRUNK_YOUNG: DeltaTable = DeltaTable {
    dx: AxisTable {
        steps: &[(0.3, 1)],
        fallback: 0,
    },
    dy: AxisTable::fixed(-1),
};

/// Mature trunk: upward, biased to the right.
pub const TRUNK_MATURE: DeltaTable = DeltaTable {
    dx: AxisTable {
        steps: &[(0.55, 1), (0.85, 0)],
        fallback: -1,
    },
    dy: AxisTable::fixed(-1),
};

pub const SHOOT_LEFT: DeltaTable = DeltaTable {
    dx: AxisTable {
        steps: &[(0.85, -1)],
        fallback: 0,
    },
    dy: AxisTable {
        steps: &[(0.4, -1)],
        fallback: 0,
    },
};

pub const SHOOT_RIGHT: DeltaTable = DeltaTable {
    dx: AxisTable {
        steps: &[(0.85, 1)],
        fallback: 0,
    },
    dy: AxisTable {
        steps: &[(0.4, -1)],
        fallback: 0,
    },
};

/// Dying tips scatter sideways in both directions.
pub const DYING: DeltaTable = DeltaTable {
    dx: AxisTable {
        steps: &[(0.45, 1), (0.9, -1)],
        fallback: 0,
    },
    dy: AxisTable {
        steps: &[(0.3, -1)],
        fallback: 0,
    },
};

/// Result of one [`BranchAgent::step`].
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// Whether the agent still has life left and should be kept.
    pub alive: bool,
    /// Children created this tick, in spawn order.
    pub spawned: Vec<BranchAgent>,
}

/// One growing tip.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchAgent {
    pub pos: Position,
    pub kind: BranchKind,
    /// Ticks left; the agent is retired when this reaches zero.
    pub life: u32,
    /// Ticks lived so far.
    pub age: u32,
    /// Direction taken on the last tick.
    pub delta: IVec2,
    /// Ticks until a trunk may spawn another shoot.
    pub cooldown: u32,
}

impl BranchAgent {
    pub fn new(pos: Position, kind: BranchKind, life: u32) -> Self {
        Self {
            pos,
            kind,
            life,
            age: 0,
            delta: IVec2::new(0, -1),
            cooldown: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Draws and stores the direction for this tick.
    pub fn choose_delta(&mut self, rng: &mut impl Rng) -> IVec2 {
        self.delta = match self.kind.delta_table(self.age) {
            Some(table) => table.sample(rng),
            None => IVec2::ZERO,
        };
        self.delta
    }

    /// Picks the glyph for the current tick from `self.delta`.
    ///
    /// Dead markers and tips close to the end of their life paint a random
    /// leaf symbol; everything else paints wood shaped by the direction.
    ///
    /// An empty `config.leaf_symbols` (rejected by [`Config::validate`])
    /// falls back to [`DEFAULT_LEAF_SYMBOLS`].
    pub fn choose_symbol(&self, config: &Config, rng: &mut impl Rng) -> (char, Style) {
        if self.kind == BranchKind::Dead || self.life < LEAF_LIFE_THRESHOLD {
            let symbol = config
                .leaf_symbols
                .choose(rng)
                .or_else(|| DEFAULT_LEAF_SYMBOLS.choose(rng))
                .copied()
                .unwrap_or('*');
            return (symbol, Style::Leaf);
        }

        let symbol = match (self.delta.x.signum(), self.delta.y.signum()) {
            (-1, -1) => '\\',
            (1, -1) => '/',
            (_, 0) if self.delta.x != 0 => '~',
            _ => '|',
        };
        (symbol, Style::Branch)
    }

    /// Advances the agent by one tick.
    ///
    /// In order: choose a direction, choose a glyph, paint it at the
    /// current position, move, age, then apply the spawn rules. An agent
    /// with no life left is not touched at all.
    ///
    /// ### Parameters
    /// - `grid` - Canvas to paint into; off-canvas positions are dropped.
    /// - `config` - Run parameters (leaf glyphs, spawn multiplier).
    /// - `rng` - Source for every random decision of this tick.
    ///
    /// ### Returns
    /// A [`StepOutcome`] telling whether the agent survives and listing
    /// the agents it spawned.
    pub fn step(&mut self, grid: &mut Grid, config: &Config, rng: &mut impl Rng) -> StepOutcome {
        if !self.is_alive() {
            return StepOutcome::default();
        }

        self.choose_delta(rng);
        let (symbol, style) = self.choose_symbol(config, rng);
        grid.write(self.pos.y, self.pos.x, symbol, style);

        self.pos = self.pos.saturating_add(self.delta);
        self.life -= 1;
        self.age += 1;
        self.cooldown = self.cooldown.saturating_sub(1);

        let mut spawned = Vec::new();
        self.spawn_trunk_shoot(config, rng, &mut spawned);
        self.spawn_shoot_branch(rng, &mut spawned);
        self.spawn_leaf_cluster(rng, &mut spawned);
        self.maybe_start_dying(rng);

        StepOutcome {
            alive: self.is_alive(),
            spawned,
        }
    }

    fn spawn_trunk_shoot(
        &mut self,
        config: &Config,
        rng: &mut impl Rng,
        out: &mut Vec<BranchAgent>,
    ) {
        if self.kind != BranchKind::Trunk
            || self.age <= TRUNK_SPAWN_MIN_AGE
            || self.cooldown != 0
            || self.life <= TRUNK_SPAWN_MIN_LIFE
        {
            return;
        }

        let chance = TRUNK_SPAWN_BASE_RATE * config.multiplier / 5.0;
        if rng.random::<f64>() >= chance {
            return;
        }

        let kind = if rng.random::<f64>() < RIGHT_SHOOT_BIAS {
            BranchKind::ShootRight
        } else {
            BranchKind::ShootLeft
        };
        let fraction = rng.random_range(SHOOT_LIFE_MIN_FRACTION..SHOOT_LIFE_MAX_FRACTION);
        let life = (self.life as f64 * fraction).floor() as u32;

        out.push(BranchAgent::new(self.pos, kind, life));
        self.cooldown = TRUNK_SHOOT_COOLDOWN;
    }

    fn spawn_shoot_branch(&self, rng: &mut impl Rng, out: &mut Vec<BranchAgent>) {
        if !self.kind.is_shoot()
            || self.age <= SHOOT_BRANCH_MIN_AGE
            || self.life <= SHOOT_BRANCH_MIN_LIFE
        {
            return;
        }
        if rng.random::<f64>() < SHOOT_BRANCH_CHANCE {
            let life = (self.life as f64 * SHOOT_BRANCH_LIFE_FRACTION).floor() as u32;
            out.push(BranchAgent::new(self.pos, self.kind, life));
        }
    }

    fn spawn_leaf_cluster(&self, rng: &mut impl Rng, out: &mut Vec<BranchAgent>) {
        if self.kind == BranchKind::Dead || self.life >= LEAF_CLUSTER_LIFE {
            return;
        }
        for _ in 0..LEAF_CLUSTER_TRIALS {
            if rng.random::<f64>() < LEAF_CLUSTER_CHANCE {
                let jitter = IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=0));
                out.push(BranchAgent::new(
                    self.pos.saturating_add(jitter),
                    BranchKind::Dead,
                    1,
                ));
            }
        }
    }

    fn maybe_start_dying(&mut self, rng: &mut impl Rng) {
        if self.kind == BranchKind::Trunk
            && self.life < DYING_LIFE
            && rng.random::<f64>() < DYING_CHANCE
        {
            self.kind = BranchKind::Dying;
        }
    }
}
