//! Active growth points.

use crate::grid::Point;
use serde::{Deserialize, Serialize};

/// State carried by tips that lay wood: the leader and its branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoot {
    pub at: Point,
    /// Last step direction, each component in -1..=1
    pub heading: (i32, i32),
    /// Steps left before the tip dies
    pub life: i32,
    /// Sideways bias, always -1 or 1
    pub curve: i32,
}

/// A stationary tip that scatters leaves around its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    pub at: Point,
    pub life: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tip {
    Trunk(Shoot),
    Branch(Shoot),
    FoliageSpawner(Spawner),
}

impl Tip {
    /// The single leader a new tree starts from
    pub fn leader(at: Point, life: i32, curve: i32) -> Self {
        Tip::Trunk(Shoot {
            at,
            heading: (0, -1),
            life,
            curve,
        })
    }

    pub fn at(&self) -> Point {
        match self {
            Tip::Trunk(s) | Tip::Branch(s) => s.at,
            Tip::FoliageSpawner(s) => s.at,
        }
    }

    pub fn life(&self) -> i32 {
        match self {
            Tip::Trunk(s) | Tip::Branch(s) => s.life,
            Tip::FoliageSpawner(s) => s.life,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tips_serialize_with_snake_case_tag() {
        let tip = Tip::FoliageSpawner(Spawner {
            at: Point::new(4, 9),
            life: 7,
        });
        let json = serde_json::to_value(tip).unwrap();
        assert_eq!(json["type"], "foliage_spawner");
        assert_eq!(json["life"], 7);

        let back: Tip = serde_json::from_value(json).unwrap();
        assert_eq!(back, tip);
    }

    #[test]
    fn leader_points_up() {
        let tip = Tip::leader(Point::new(16, 29), 28, 1);
        assert!(matches!(tip, Tip::Trunk(s) if s.heading == (0, -1)));
        assert_eq!(tip.life(), 28);
        assert_eq!(tip.at(), Point::new(16, 29));
    }
}
