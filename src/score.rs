//! Tree quality score, 0 to 100.
//!
//! Three capped sub-scores: age (30), branches (35), foliage (35). The caps
//! scale with the grid so a 64x64 tree is judged against a 64x64 canvas.

use crate::grid::Grid;
use crate::pixel::{PixelKind, PixelSet};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

const AGE_POINTS: f64 = 30.0;
const BRANCH_POINTS: f64 = 35.0;
const FOLIAGE_POINTS: f64 = 35.0;

/// Rounded sub-scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub age: u32,
    pub branches: u32,
    pub foliage: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeScore {
    pub total: u32,
    /// Grown pixels / 5, rounded
    pub age: u32,
    pub branches: u32,
    pub foliage: u32,
    pub breakdown: ScoreBreakdown,
}

/// Score the grown pixels. Foundation pixels are never part of `pixels`.
pub fn score(grid: &Grid, pixels: &PixelSet) -> TreeScore {
    let age = (pixels.len() as f64 / 5.0).round();
    let branches = pixels.count(PixelKind::Branch) as f64;
    let foliage = pixels.count(PixelKind::Leaf) as f64;

    let area = grid.area() as f64;
    let max_age = area * 0.15 / 5.0;
    let max_branches = grid.height as f64 * 0.85;
    let max_foliage = area * 0.13;

    let age_score = (age / max_age * AGE_POINTS).min(AGE_POINTS);
    let branch_score = (branches / max_branches * BRANCH_POINTS).min(BRANCH_POINTS);
    let foliage_score = (foliage / max_foliage * FOLIAGE_POINTS).min(FOLIAGE_POINTS);

    let total = (age_score + branch_score + foliage_score).round() as u32;

    TreeScore {
        total: total.min(MAX_SCORE),
        age: age as u32,
        branches: branches as u32,
        foliage: foliage as u32,
        breakdown: ScoreBreakdown {
            age: age_score.round() as u32,
            branches: branch_score.round() as u32,
            foliage: foliage_score.round() as u32,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    #[test]
    fn empty_tree_scores_zero() {
        assert_eq!(score(&Grid::default(), &PixelSet::new()), TreeScore::default());
    }

    #[test]
    fn counts_by_kind() {
        let mut pixels = PixelSet::new();
        for x in 0..6 {
            pixels.insert_vacant(Point::new(x, 0), PixelKind::Branch);
        }
        for x in 0..4 {
            pixels.insert_vacant(Point::new(x, 1), PixelKind::Leaf);
        }
        pixels.insert_vacant(Point::new(9, 9), PixelKind::Trunk);

        let s = score(&Grid::default(), &pixels);
        // 11 pixels / 5 = 2.2
        assert_eq!(s.age, 2);
        assert_eq!(s.branches, 6);
        assert_eq!(s.foliage, 4);
        // age 2/30.72*30 = 1.95, branches 6/27.2*35 = 7.72, foliage 4/133.12*35 = 1.05
        assert_eq!(s.breakdown, ScoreBreakdown { age: 2, branches: 8, foliage: 1 });
        assert_eq!(s.total, 11);
    }

    #[test]
    fn saturated_canvas_caps_at_hundred() {
        let grid = Grid::default();
        let mut pixels = PixelSet::new();
        for y in 0..grid.height {
            for x in 0..grid.width {
                let kind = if y % 2 == 0 { PixelKind::Branch } else { PixelKind::Leaf };
                pixels.insert_vacant(Point::new(x, y), kind);
            }
        }
        let s = score(&grid, &pixels);
        assert_eq!(s.total, MAX_SCORE);
        assert_eq!(s.breakdown, ScoreBreakdown { age: 30, branches: 35, foliage: 35 });
    }
}
