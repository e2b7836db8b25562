//! Deterministic pixel bonsai.
//!
//! An eight-digit seed drives a small growth automaton over a fixed grid:
//! a leader trunk, branches it sprouts, and foliage spawners left where
//! branches end. Every decision is integer mixing of the step counter and
//! tip state, so the same seed and the same sequence of steps always yield
//! the same tree on any implementation.
//!
//! ```
//! use pixelbonsai::{Grid, Seed, SimulationState};
//!
//! let seed: Seed = "2.12345678".parse().unwrap();
//! let mut tree = SimulationState::initialize(Grid::default(), seed);
//! tree.grow_to_maturity(seed, 1_000);
//! assert!(!tree.can_grow());
//! assert!(tree.score().total <= 100);
//! ```

pub mod error;
pub mod grid;
pub mod growth;
pub mod metadata;
pub mod pixel;
pub mod render;
pub mod rng;
pub mod score;
pub mod seed;
pub mod sim;
pub mod store;
pub mod tip;

pub use error::{BonsaiError, Result};
pub use grid::{Grid, Point};
pub use pixel::{Pixel, PixelKind, PixelSet};
pub use score::{score, TreeScore};
pub use seed::{GrowthParams, Seed};
pub use sim::SimulationState;
pub use tip::Tip;
