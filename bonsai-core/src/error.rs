use thiserror::Error;

/// Rejected construction parameters.
///
/// This is the only failure the core surfaces; everything past
/// construction is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("grid dimensions {rows}x{cols} exceed the maximum of {max}")]
    DimensionTooLarge { rows: usize, cols: usize, max: usize },

    #[error("base column {base_col} is outside {min}..={max}")]
    BaseColumnOutOfRange { base_col: i32, min: i32, max: i32 },

    #[error("leaf symbol set must not be empty")]
    EmptyLeafSymbols,

    #[error("spawn multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f64),
}
