//! Core of the ASCII bonsai generator: a stochastic branching automaton
//! painting into a fixed-size character grid.
//!
//! Main components:
//! - [`grid`] — the styled character canvas and its renderings.
//! - [`agent`] — branch agents, their direction tables and spawn rules.
//! - [`engine`] — the growth engine driving all agents one tick at a time.
//! - [`config`] — run parameters and their validation.
//! - [`error`] — configuration errors.
//! - [`types`] — shared types (positions, style tags).

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod types;

pub use agent::{BranchAgent, BranchKind, StepOutcome};
pub use config::Config;
pub use engine::GrowthEngine;
pub use error::ConfigError;
pub use grid::{Cell, Grid, RenderedCell};
pub use types::{Position, Style};
