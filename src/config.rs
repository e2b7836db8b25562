use pixelbonsai::{Grid, Seed};
use std::path::PathBuf;

/// Upper bound on steps when growing a tree "to maturity"
pub const MATURITY_LIMIT: u64 = 10_000;

/// Configuration for the terminal garden
#[derive(Clone)]
pub struct GardenConfig {
    pub infinite: bool,
    pub print: bool,
    pub time_step: f32,
    pub time_wait: f64,
    pub grid: Grid,
    pub seed: Seed,
    /// Draw a fresh random seed for every step
    pub wander: bool,
    pub rng_seed: Option<u64>,
    pub max_steps: Option<u64>,
    pub leaf: char,
}

/// Configuration for one-shot SVG/PNG export
#[derive(Clone)]
pub struct ExportConfig {
    pub grid: Grid,
    pub seed: Seed,
    /// Stop after this many steps instead of growing to maturity
    pub steps: Option<u64>,
    pub out: Option<PathBuf>,
    pub scale: u32,
}

impl ExportConfig {
    pub fn step_limit(&self) -> u64 {
        self.steps.unwrap_or(MATURITY_LIMIT)
    }
}
