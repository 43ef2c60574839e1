use crate::error::ConfigError;

/// Largest accepted row or column count. Keeps every grid coordinate
/// representable as an `i32` agent position.
pub const MAX_DIMENSION: usize = 4096;

/// Accepted range for [`Config::base_col`]. Wide enough to plant the tree
/// well off either side of the largest grid, narrow enough that pot and
/// branch coordinates never approach the `i32` limits.
pub const BASE_COL_RANGE: std::ops::RangeInclusive<i32> =
    -(MAX_DIMENSION as i32)..=2 * MAX_DIMENSION as i32;

/// Leaf glyphs used by the default configuration.
pub static DEFAULT_LEAF_SYMBOLS: [char; 6] = ['&', '*', '@', '#', '%', '^'];

/// Parameters for one growth run.
///
/// Read-only for the lifetime of a [`crate::engine::GrowthEngine`];
/// `reset` keeps it as is.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Life of the seeded trunk, in ticks.
    pub life_start: u32,
    /// Scales the trunk's per-tick chance of spawning a shoot.
    pub multiplier: f64,
    pub rows: usize,
    pub cols: usize,
    /// Glyphs picked uniformly for leaves and dead markers.
    pub leaf_symbols: Vec<char>,
    /// Column of the pot centre; the trunk starts right above it.
    pub base_col: i32,
    /// Fixed RNG seed. `None` draws a fresh seed for every engine.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            life_start: 38,
            multiplier: 18.0,
            rows: 38,
            cols: 70,
            leaf_symbols: DEFAULT_LEAF_SYMBOLS.to_vec(),
            base_col: 15,
            rng_seed: None,
        }
    }
}

impl Config {
    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(ConfigError::DimensionTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_DIMENSION,
            });
        }
        if !BASE_COL_RANGE.contains(&self.base_col) {
            return Err(ConfigError::BaseColumnOutOfRange {
                base_col: self.base_col,
                min: *BASE_COL_RANGE.start(),
                max: *BASE_COL_RANGE.end(),
            });
        }
        if self.leaf_symbols.is_empty() {
            return Err(ConfigError::EmptyLeafSymbols);
        }
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.multiplier));
        }
        Ok(())
    }

    /// Row of the pot's top line.
    pub fn base_row(&self) -> i32 {
        self.rows as i32 - 3
    }
}
