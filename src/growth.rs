//! The growth automaton: one call advances every tip by one step.
//!
//! Tips are processed in list order and the first tip to claim a cell keeps
//! it, so the order of the returned tip list is part of the result. Tips a
//! tip spawns are queued ahead of the tip's own successor.

use crate::grid::{Grid, Point};
use crate::pixel::{PixelKind, PixelSet};
use crate::rng;
use crate::seed::GrowthParams;
use crate::tip::{Shoot, Spawner, Tip};
use tracing::trace;

/// Thickening runs on every third step counter value
const THICKEN_INTERVAL: u64 = 3;

/// Life a foliage spawner loses each step
const SPAWNER_DECAY: i32 = 2;

/// Leaves keep this many columns clear on either side of the trunk
const TRUNK_CLEARANCE: i32 = 2;

/// Result of one growth step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Growth {
    pub pixels: PixelSet,
    pub tips: Vec<Tip>,
    /// Step counter after the step
    pub step: u64,
}

impl Growth {
    /// No tips left: the tree will never change again
    pub fn is_dormant(&self) -> bool {
        self.tips.is_empty()
    }
}

/// Which kind of wood a shoot lays
#[derive(Clone, Copy, PartialEq, Eq)]
enum Wood {
    Trunk,
    Branch,
}

impl Wood {
    fn pixel(self) -> PixelKind {
        match self {
            Wood::Trunk => PixelKind::Trunk,
            Wood::Branch => PixelKind::Branch,
        }
    }

    fn tip(self, shoot: Shoot) -> Tip {
        match self {
            Wood::Trunk => Tip::Trunk(shoot),
            Wood::Branch => Tip::Branch(shoot),
        }
    }
}

/// Advance `tips` over `pixels` by one step.
pub fn step(grid: &Grid, pixels: &PixelSet, tips: &[Tip], params: &GrowthParams, step: u64) -> Growth {
    let mut next = pixels.clone();
    let mut sprouts = Vec::with_capacity(tips.len() + 2);

    for tip in tips {
        if tip.life() <= 0 {
            if let Tip::Branch(shoot) = tip {
                if grid.in_canopy(shoot.at) {
                    sprouts.push(foliage_at(shoot.at, params));
                }
            }
            continue;
        }

        match *tip {
            Tip::Trunk(shoot) => grow_trunk(grid, &mut next, &mut sprouts, params, shoot, step),
            Tip::Branch(shoot) => grow_branch(grid, &mut next, &mut sprouts, params, shoot, step),
            Tip::FoliageSpawner(spawner) => {
                spread_foliage(grid, &mut next, &mut sprouts, params, spawner, step)
            }
        }
    }

    let counter = step + 1;
    if counter % THICKEN_INTERVAL == 0 {
        thicken(grid, &mut next, params, counter);
    }

    trace!(step = counter, tips = sprouts.len(), pixels = next.len(), "growth step");

    Growth {
        pixels: next,
        tips: sprouts,
        step: counter,
    }
}

fn foliage_at(at: Point, params: &GrowthParams) -> Tip {
    Tip::FoliageSpawner(Spawner {
        at,
        life: params.foliage_life(),
    })
}

fn grow_trunk(
    grid: &Grid,
    pixels: &mut PixelSet,
    sprouts: &mut Vec<Tip>,
    params: &GrowthParams,
    shoot: Shoot,
    step: u64,
) {
    // Sinuous leader: the bias flips on a life-based period and is only
    // applied on part of every eight steps.
    let mut curve = shoot.curve;
    if shoot.life % params.curve_period() == 0 {
        curve = -curve;
    }
    let dx = if step % 8 < params.trunk_curve as u64 { curve } else { 0 };
    let dy = -1;

    let roll = rng::percent(rng::trunk_branch_seed(step, shoot.at, shoot.life));
    if shoot.life < grid.max_trunk_height() - 2 && roll < params.branch_chance() {
        let heading = params.branch_heading();
        let base = ((10.0 + params.branch_length as f64 * 1.5) * grid.scale()).floor() as i32;
        // lower branches reach further
        let height_bonus = (shoot.at.y - 10).div_euclid(3).max(0);
        sprouts.push(Tip::Branch(Shoot {
            at: shoot.at,
            heading: (heading, 0),
            life: base + height_bonus,
            curve: heading,
        }));
    }

    advance(grid, pixels, sprouts, params, Wood::Trunk, shoot, (dx, dy), curve);
}

fn grow_branch(
    grid: &Grid,
    pixels: &mut PixelSet,
    sprouts: &mut Vec<Tip>,
    params: &GrowthParams,
    shoot: Shoot,
    step: u64,
) {
    let rising = params.branch_angle >= 3 && step % 2 == 0;
    let dy = if rising { -1 } else { 0 };
    let dx = if step % 5 == 0 { 0 } else { shoot.curve };

    let height_pct = shoot.at.y.abs() as i64 * 100 / grid.height as i64;
    let chance = 20 + height_pct * 30 / 100;
    let roll = rng::percent(rng::sub_branch_seed(step, shoot.at, shoot.life));
    if shoot.life > 5 && shoot.life % 6 == 0 && roll < chance {
        let life = ((6.0 + params.branch_length as f64 * 0.8) * grid.scale()).floor() as i32;
        sprouts.push(Tip::Branch(Shoot {
            at: shoot.at,
            heading: (-shoot.curve, -1),
            life,
            curve: -shoot.curve,
        }));
    }

    advance(grid, pixels, sprouts, params, Wood::Branch, shoot, (dx, dy), shoot.curve);
}

/// Move a shoot one cell, laying wood. Off-canvas moves drop the tip; a
/// move into wood blocks it, and a blocked branch in the canopy zone turns
/// into foliage where it stands.
#[allow(clippy::too_many_arguments)]
fn advance(
    grid: &Grid,
    pixels: &mut PixelSet,
    sprouts: &mut Vec<Tip>,
    params: &GrowthParams,
    wood: Wood,
    shoot: Shoot,
    (dx, dy): (i32, i32),
    curve: i32,
) {
    let target = shoot.at.offset(dx, dy);
    if !grid.contains(target) {
        return;
    }

    if pixels.grow_wood(target, wood.pixel()) {
        sprouts.push(wood.tip(Shoot {
            at: target,
            heading: (dx, dy),
            life: shoot.life - 1,
            curve,
        }));
    } else if wood == Wood::Branch && grid.in_canopy(shoot.at) {
        sprouts.push(foliage_at(shoot.at, params));
    }
}

fn spread_foliage(
    grid: &Grid,
    pixels: &mut PixelSet,
    sprouts: &mut Vec<Tip>,
    params: &GrowthParams,
    spawner: Spawner,
    step: u64,
) {
    let radius = params.leaf_radius();
    let trunk = grid.trunk_column();

    for index in 0..params.leaf_attempts() {
        let (ox, oy) = rng::leaf_offset(step, index, spawner.at, radius);

        // flattened ellipse
        let dist = ((ox * ox) as f64 + (oy * oy) as f64 * 0.7).sqrt();
        if dist > radius as f64 {
            continue;
        }

        let leaf = spawner.at.offset(ox, oy);
        if (leaf.x - trunk).abs() < TRUNK_CLEARANCE {
            continue;
        }
        if grid.contains(leaf) {
            pixels.insert_vacant(leaf, PixelKind::Leaf);
        }
    }

    // spawners burn two life per step
    let life = spawner.life - SPAWNER_DECAY;
    if life > 0 {
        sprouts.push(Tip::FoliageSpawner(Spawner { life, ..spawner }));
    }
}

/// Pipe-model thickening: plain trunk cells low on the canvas may gain
/// `TrunkThick` neighbours. `counter` is the already-incremented step.
fn thicken(grid: &Grid, pixels: &mut PixelSet, params: &GrowthParams, counter: u64) {
    let trunk: Vec<Point> = pixels
        .iter()
        .filter(|p| p.kind == PixelKind::Trunk)
        .map(|p| p.at())
        .collect();

    for at in trunk {
        let height_pct = if at.y > 10 { (at.y as i64 - 10) * 100 / 30 } else { 0 };
        let chance = ((params.thickening as i64 * 100 + 450) * height_pct) / 3000;

        let left = at.offset(-1, 0);
        if grid.contains(left)
            && !pixels.contains(left)
            && rng::percent(rng::thicken_left_seed(counter, at)) < chance
        {
            pixels.insert_vacant(left, PixelKind::TrunkThick);
        }

        let right = at.offset(1, 0);
        if grid.contains(right)
            && !pixels.contains(right)
            && rng::percent(rng::thicken_right_seed(counter, at)) < chance
        {
            pixels.insert_vacant(right, PixelKind::TrunkThick);
        }
    }
}
