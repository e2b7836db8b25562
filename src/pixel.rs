//! Pixel categories and the ordered pixel set.

use crate::grid::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelKind {
    Trunk,
    TrunkThick,
    Branch,
    Leaf,
    Root,
}

impl PixelKind {
    /// Wood blocks growth; leaves may be grown over
    pub fn is_wood(self) -> bool {
        !matches!(self, PixelKind::Leaf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: PixelKind,
}

impl Pixel {
    pub const fn new(at: Point, kind: PixelKind) -> Self {
        Self {
            x: at.x,
            y: at.y,
            kind,
        }
    }

    pub const fn at(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pixels keyed by coordinate, remembering insertion order.
///
/// Order is observable: the thickening pass walks trunk pixels in the order
/// they were grown, and neighbouring trunk cells can race for the same
/// empty cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Pixel>", into = "Vec<Pixel>")]
pub struct PixelSet {
    order: Vec<Pixel>,
    index: HashMap<Point, PixelKind>,
}

impl PixelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, at: Point) -> Option<PixelKind> {
        self.index.get(&at).copied()
    }

    pub fn contains(&self, at: Point) -> bool {
        self.index.contains_key(&at)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pixel> + '_ {
        self.order.iter()
    }

    pub fn count(&self, kind: PixelKind) -> usize {
        self.order.iter().filter(|p| p.kind == kind).count()
    }

    /// Place a pixel only if the cell is empty
    pub fn insert_vacant(&mut self, at: Point, kind: PixelKind) -> bool {
        if self.contains(at) {
            return false;
        }
        self.order.push(Pixel::new(at, kind));
        self.index.insert(at, kind);
        true
    }

    /// Place wood over an empty cell or a leaf. A replaced leaf leaves the
    /// ordering and the wood is appended at the end. Returns false when the
    /// cell already holds wood.
    pub fn grow_wood(&mut self, at: Point, kind: PixelKind) -> bool {
        match self.get(at) {
            Some(existing) if existing.is_wood() => false,
            Some(_) => {
                self.order.retain(|p| p.at() != at);
                self.order.push(Pixel::new(at, kind));
                self.index.insert(at, kind);
                true
            }
            None => self.insert_vacant(at, kind),
        }
    }
}

impl PartialEq for PixelSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for PixelSet {}

impl From<Vec<Pixel>> for PixelSet {
    /// First occurrence of a coordinate wins
    fn from(pixels: Vec<Pixel>) -> Self {
        let mut set = PixelSet::new();
        for p in pixels {
            set.insert_vacant(p.at(), p.kind);
        }
        set
    }
}

impl From<PixelSet> for Vec<Pixel> {
    fn from(set: PixelSet) -> Self {
        set.order
    }
}

impl FromIterator<Pixel> for PixelSet {
    fn from_iter<I: IntoIterator<Item = Pixel>>(iter: I) -> Self {
        PixelSet::from(iter.into_iter().collect::<Vec<_>>())
    }
}
