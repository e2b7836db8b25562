//! Whole-tree properties over a spread of seeds.

use pixelbonsai::seed::UNIT;
use pixelbonsai::{Grid, Seed, SimulationState, Tip};

const LIMIT: u64 = 10_000;

fn seeds() -> impl Iterator<Item = Seed> {
    // Walk the fractional range with a stride that touches every digit
    (0..40u64).map(|i| Seed::from_e8s(i * UNIT + (i * 24_681_357) % UNIT))
}

fn grown(grid: Grid, seed: Seed) -> SimulationState {
    let mut tree = SimulationState::initialize(grid, seed);
    tree.grow_to_maturity(seed, LIMIT);
    tree
}

#[test]
fn same_seed_same_tree() {
    for seed in seeds().take(10) {
        let a = grown(Grid::default(), seed);
        let b = grown(Grid::default(), seed);
        assert_eq!(a, b, "seed {seed}");
        assert_eq!(a.svg(), b.svg());
    }
}

#[test]
fn every_tree_matures_inside_the_grid() {
    for seed in seeds() {
        let tree = grown(Grid::default(), seed);
        assert!(!tree.can_grow(), "seed {seed} still growing after {LIMIT} steps");
        assert!(tree.step < LIMIT);
        for p in tree.pixels.iter() {
            assert!(
                tree.grid.contains(p.at()),
                "seed {seed}: pixel {p:?} outside the grid"
            );
        }
    }
}

#[test]
fn large_grids_mature_too() {
    let grid = Grid::square(64).unwrap();
    for seed in seeds().step_by(8) {
        let tree = grown(grid, seed);
        assert!(!tree.can_grow(), "seed {seed}");
        assert!(!tree.pixels.is_empty());
    }
}

#[test]
fn scores_stay_in_range() {
    for seed in seeds() {
        let score = grown(Grid::default(), seed).score();
        assert!(score.total <= 100, "seed {seed}: {score:?}");
        let b = score.breakdown;
        assert!(b.age <= 30 && b.branches <= 35 && b.foliage <= 35, "seed {seed}: {b:?}");
    }
}

#[test]
fn watering_a_mature_tree_fails() {
    let seed = Seed::default();
    let mut tree = grown(Grid::default(), seed);
    let before = tree.clone();
    assert!(tree.water(seed).is_err());
    assert_eq!(tree, before);
    assert_eq!(tree.advance(seed), before);
}

#[test]
fn growth_never_removes_wood() {
    let seed = Seed::default();
    let mut tree = SimulationState::initialize(Grid::default(), seed);
    while tree.can_grow() {
        let next = tree.advance(seed);
        for p in tree.pixels.iter().filter(|p| p.kind.is_wood()) {
            assert!(next.pixels.get(p.at()).is_some_and(|k| k.is_wood()));
        }
        assert_eq!(next.step, tree.step + 1);
        tree = next;
    }
}

#[test]
fn tips_stay_in_bounds_and_trunk_never_outgrows_its_height() {
    for (grid, seed) in seeds()
        .map(|s| (Grid::default(), s))
        .chain(seeds().step_by(10).map(|s| (Grid::square(64).unwrap(), s)))
    {
        let mut tree = SimulationState::initialize(grid, seed);
        while tree.can_grow() && tree.step < LIMIT {
            for tip in &tree.tips {
                assert!(grid.contains(tip.at()), "seed {seed}: {tip:?} at step {}", tree.step);
                if let Tip::Trunk(shoot) = tip {
                    assert!(shoot.life <= grid.max_trunk_height(), "seed {seed}: {tip:?}");
                }
            }
            tree = tree.advance(seed);
        }
        assert!(!tree.can_grow(), "seed {seed}");
    }
}
