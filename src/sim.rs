//! Per-tree simulation state and the step driver.
//!
//! A tree is a plain value: grid, current seed, grown pixels, live tips and
//! the step counter. Callers own one `SimulationState` per tree and apply
//! steps to it strictly in order; nothing here is shared or cached between
//! trees.

use crate::error::{BonsaiError, Result};
use crate::grid::Grid;
use crate::growth;
use crate::pixel::PixelSet;
use crate::render;
use crate::score::{score, TreeScore};
use crate::seed::Seed;
use crate::tip::Tip;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub grid: Grid,
    /// Seed supplied with the most recent step, used for rendering
    pub seed: Seed,
    pub pixels: PixelSet,
    pub tips: Vec<Tip>,
    pub step: u64,
}

impl SimulationState {
    /// Fresh tree: no grown pixels and a single leader at the foundation apex
    pub fn initialize(grid: Grid, seed: Seed) -> Self {
        let params = seed.growth_params();
        let leader = Tip::leader(grid.sprout(), grid.max_trunk_height(), params.initial_curve());
        Self {
            grid,
            seed,
            pixels: PixelSet::new(),
            tips: vec![leader],
            step: 0,
        }
    }

    pub fn can_grow(&self) -> bool {
        !self.tips.is_empty()
    }

    /// One growth step with parameters re-derived from `seed`. A dormant
    /// tree is returned unchanged.
    pub fn advance(&self, seed: Seed) -> Self {
        if !self.can_grow() {
            return self.clone();
        }

        let params = seed.growth_params();
        let out = growth::step(&self.grid, &self.pixels, &self.tips, &params, self.step);
        if out.is_dormant() {
            debug!(step = out.step, pixels = out.pixels.len(), "tree reached maturity");
        }

        Self {
            grid: self.grid,
            seed,
            pixels: out.pixels,
            tips: out.tips,
            step: out.step,
        }
    }

    /// Apply one watering in place. Watering a dormant tree is a caller
    /// error: it can never grow again.
    pub fn water(&mut self, seed: Seed) -> Result<TreeScore> {
        if !self.can_grow() {
            return Err(BonsaiError::Dormant);
        }
        *self = self.advance(seed);
        Ok(self.score())
    }

    /// Keep stepping with the same seed until the tree is dormant or `limit`
    /// steps have been taken. Returns the number of steps applied.
    pub fn grow_to_maturity(&mut self, seed: Seed, limit: u64) -> u64 {
        let mut taken = 0;
        while self.can_grow() && taken < limit {
            *self = self.advance(seed);
            taken += 1;
        }
        taken
    }

    pub fn score(&self) -> TreeScore {
        score(&self.grid, &self.pixels)
    }

    pub fn svg(&self) -> String {
        render::svg(&self.grid, &self.pixels, &self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    #[test]
    fn initialize_places_single_leader() {
        let state = SimulationState::initialize(Grid::default(), Seed::default());
        assert!(state.pixels.is_empty());
        assert_eq!(state.step, 0);
        assert_eq!(state.tips, vec![Tip::leader(Point::new(16, 29), 28, -1)]);
        assert!(state.can_grow());
    }

    #[test]
    fn right_leaning_digit_starts_with_positive_curve() {
        let seed: Seed = "0.70000000".parse().unwrap();
        let state = SimulationState::initialize(Grid::default(), seed);
        assert_eq!(state.tips, vec![Tip::leader(Point::new(16, 29), 28, 1)]);
    }

    #[test]
    fn dormant_tree_is_left_alone() {
        let mut state = SimulationState::initialize(Grid::default(), Seed::default());
        state.tips.clear();
        let before = state.clone();

        let after = state.advance(Seed::from_e8s(987_654_321));
        assert_eq!(after, before);
        assert!(!after.can_grow());

        assert!(matches!(state.water(Seed::default()), Err(BonsaiError::Dormant)));
        assert_eq!(state, before);
    }

    #[test]
    fn advance_records_latest_seed() {
        let state = SimulationState::initialize(Grid::default(), Seed::default());
        let next_seed = Seed::from_e8s(150_000_001);
        let next = state.advance(next_seed);
        assert_eq!(next.seed, next_seed);
        assert_eq!(next.step, 1);
        assert_eq!(next.pixels.len(), 1);
    }

    #[test]
    fn grows_to_maturity_and_stops() {
        let mut state = SimulationState::initialize(Grid::default(), Seed::default());
        let taken = state.grow_to_maturity(Seed::default(), 10_000);
        assert!(taken < 10_000);
        assert!(!state.can_grow());
        assert_eq!(state.step, taken);
        assert_eq!(state.grow_to_maturity(Seed::default(), 10), 0);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = SimulationState::initialize(Grid::default(), Seed::default());
        state.grow_to_maturity(Seed::default(), 12);
        let json = serde_json::to_string(&state).unwrap();
        let back: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(json.contains(r#""seed":"2.12345678""#));
    }
}
