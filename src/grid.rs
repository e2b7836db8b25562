//! Growth canvas geometry.

use crate::error::{BonsaiError, Result};
use serde::{Deserialize, Serialize};

/// Smallest and largest accepted side length
pub const MIN_SIDE: i32 = 8;
pub const MAX_SIDE: i32 = 256;

/// Row height the growth constants were tuned for
const REFERENCE_HEIGHT: f64 = 32.0;

/// A cell coordinate. Signed so candidate moves may step off the canvas
/// before the bounds test rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Fixed-size growth canvas. `y` grows downward; the tree is rooted on the
/// bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSides")]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

/// Unchecked wire form; stored grids go through `Grid::new` on load
#[derive(Deserialize)]
struct GridSides {
    width: i32,
    height: i32,
}

impl TryFrom<GridSides> for Grid {
    type Error = BonsaiError;

    fn try_from(sides: GridSides) -> Result<Self> {
        Grid::new(sides.width, sides.height)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
        }
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let valid = |side: i32| (MIN_SIDE..=MAX_SIDE).contains(&side);
        if !valid(width) || !valid(height) {
            return Err(BonsaiError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    /// Square grid helper used by the CLI
    pub fn square(side: i32) -> Result<Self> {
        Self::new(side, side)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Column the trunk is rooted in
    pub fn trunk_column(&self) -> i32 {
        self.width / 2
    }

    /// Initial life of the leader tip
    pub fn max_trunk_height(&self) -> i32 {
        self.height - 4
    }

    /// Length multiplier for branches on grids taller than 32 rows
    pub fn scale(&self) -> f64 {
        self.height as f64 / REFERENCE_HEIGHT
    }

    /// Where the leader tip starts: the apex of the foundation
    pub fn sprout(&self) -> Point {
        Point::new(self.trunk_column(), self.height - 3)
    }

    /// Branches may only turn into foliage away from the trunk or in the
    /// upper part of the canvas.
    pub fn in_canopy(&self, p: Point) -> bool {
        let far_from_trunk = (p.x - self.trunk_column()).abs() >= 3;
        let high_enough = (p.y as f64) < self.height as f64 * 0.6;
        far_from_trunk || high_enough
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_geometry() {
        let grid = Grid::default();
        assert_eq!(grid.trunk_column(), 16);
        assert_eq!(grid.max_trunk_height(), 28);
        assert_eq!(grid.sprout(), Point::new(16, 29));
        assert!((grid.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bounds_are_half_open() {
        let grid = Grid::default();
        assert!(grid.contains(Point::new(0, 0)));
        assert!(grid.contains(Point::new(31, 31)));
        assert!(!grid.contains(Point::new(32, 0)));
        assert!(!grid.contains(Point::new(0, -1)));
    }

    #[test]
    fn canopy_zone() {
        let grid = Grid::default();
        // close to the trunk and low: no foliage
        assert!(!grid.in_canopy(Point::new(17, 25)));
        // far from the trunk
        assert!(grid.in_canopy(Point::new(19, 25)));
        // 32 * 0.6 = 19.2, so row 19 is high enough and row 20 is not
        assert!(grid.in_canopy(Point::new(16, 19)));
        assert!(!grid.in_canopy(Point::new(16, 20)));
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(Grid::new(4, 32).is_err());
        assert!(Grid::new(32, 1024).is_err());
        assert!(Grid::square(64).is_ok());
    }

    #[test]
    fn stored_grids_are_validated_on_load() {
        let grid: Grid = serde_json::from_str(r#"{"width":64,"height":64}"#).unwrap();
        assert_eq!(grid, Grid::square(64).unwrap());
        assert!(serde_json::from_str::<Grid>(r#"{"width":100000,"height":100000}"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"width":32,"height":2}"#).is_err());
    }
}
