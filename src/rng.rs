//! Deterministic percent rolls.
//!
//! Growth never touches a real random source. Every decision mixes the step
//! counter with tip or pixel state through fixed multipliers and reduces the
//! result to a percentage. Other implementations of the tree (the minting
//! backend, earlier previews) use the same constants, so changing any of
//! them forks every existing tree.

use crate::grid::Point;

/// Normalized modulo into [0, 99]
pub fn percent(seed: i64) -> i64 {
    ((seed % 100) + 100) % 100
}

/// Trunk deciding whether to sprout a branch
pub fn trunk_branch_seed(step: u64, at: Point, life: i32) -> i64 {
    (step as i64 * 31 + at.x as i64 * 17 + at.y as i64 * 13 + life as i64 * 7) * 97
}

/// Branch deciding whether to fork a sub-branch
pub fn sub_branch_seed(step: u64, at: Point, life: i32) -> i64 {
    (step as i64 * 23 + at.x as i64 * 11 + at.y as i64 * 7 + life as i64 * 3) * 89
}

/// Thickening roll for the cell left of a trunk pixel
pub fn thicken_left_seed(step: u64, at: Point) -> i64 {
    (step as i64 * 37 + at.x as i64 * 19 + at.y as i64 * 23) * 73
}

/// Thickening roll for the cell right of a trunk pixel
pub fn thicken_right_seed(step: u64, at: Point) -> i64 {
    (step as i64 * 41 + at.x as i64 * 29 + at.y as i64 * 31) * 79
}

/// Offset of the `index`-th leaf a spawner at `at` tries to place, each
/// component in `-radius..=radius`.
pub fn leaf_offset(step: u64, index: i32, at: Point, radius: i32) -> (i32, i32) {
    let mix = step as i64 * 11 + index as i64 * 17 + at.x as i64 * 7 + at.y as i64 * 13;
    let span = (radius * 2 + 1) as i64;
    let ox = (mix * 19).rem_euclid(span) as i32 - radius;
    let oy = (mix * 23).rem_euclid(span) as i32 - radius;
    (ox, oy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_normalized() {
        assert_eq!(percent(0), 0);
        assert_eq!(percent(199), 99);
        assert_eq!(percent(-1), 99);
        assert_eq!(percent(-250), 50);
    }

    #[test]
    fn trunk_mix_matches_reference_value() {
        // step 3, tip at (17, 26) with 25 life left
        let seed = trunk_branch_seed(3, Point::new(17, 26), 25);
        assert_eq!(seed, 86_815);
        assert_eq!(percent(seed), 15);
    }

    #[test]
    fn thickening_mixes_differ_per_side() {
        let at = Point::new(17, 28);
        assert_eq!(thicken_left_seed(3, at), 78_694);
        assert_eq!(thicken_right_seed(3, at), 117_236);
    }

    #[test]
    fn leaf_offsets_stay_within_radius() {
        for step in 0..50 {
            for index in 0..10 {
                let (ox, oy) = leaf_offset(step, index, Point::new(9, 12), 3);
                assert!((-3..=3).contains(&ox));
                assert!((-3..=3).contains(&oy));
            }
        }
    }
}
