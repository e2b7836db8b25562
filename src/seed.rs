//! Growth seeds and the eight digit parameters derived from them.
//!
//! A seed is a balance-like number with exactly eight decimal places. The
//! integer part is cosmetic; every growth decision reads the fractional
//! digits only. Seeds are held in fixed point so the digits never drift
//! through float formatting once parsed.

use crate::error::{BonsaiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits that drive growth
pub const DIGITS: usize = 8;

/// 10^8: one whole unit expressed in fractional units
pub const UNIT: u64 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed {
    whole: u64,
    fraction: u32,
}

impl Seed {
    /// Build a seed from a ledger amount in 10^-8 units
    pub fn from_e8s(e8s: u64) -> Self {
        Self {
            whole: e8s / UNIT,
            fraction: (e8s % UNIT) as u32,
        }
    }

    /// Build a seed from a float, rounding the fractional part to eight
    /// places. A fraction that rounds up to a whole unit yields all-zero
    /// digits and leaves the integer part alone.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(BonsaiError::InvalidSeed(format!("{value} is not finite")));
        }
        if value < 0.0 {
            return Err(BonsaiError::InvalidSeed(format!("{value} is negative")));
        }

        let frac = (value % 1.0).abs();
        let text = format!("{frac:.8}");
        let digits = text.split_once('.').map(|(_, d)| d).unwrap_or("0");
        let fraction = digits
            .parse::<u32>()
            .map_err(|e| BonsaiError::InvalidSeed(format!("{value}: {e}")))?;

        Ok(Self {
            whole: value.trunc() as u64,
            fraction,
        })
    }

    pub fn whole(&self) -> u64 {
        self.whole
    }

    /// Fractional part as an integer in 0..10^8
    pub fn fraction(&self) -> u32 {
        self.fraction
    }

    /// Fractional digits, most significant first
    pub fn digits(&self) -> [u8; DIGITS] {
        let mut out = [0u8; DIGITS];
        let mut rest = self.fraction;
        for slot in out.iter_mut().rev() {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        out
    }

    pub fn growth_params(&self) -> GrowthParams {
        GrowthParams::from_digits(self.digits())
    }

    /// Canvas background derived from the digits
    pub fn background(&self) -> Hsl {
        let d = self.digits();
        let hue = (d[0] as u16 * 100 + d[1] as u16 * 10 + d[2] as u16) % 360;
        let saturation = 15 + d[3] * 3 + d[4];
        let lightness = 12.0 + (d[5] + d[6]) as f64 / 2.0;
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        // 2.12345678
        Self {
            whole: 2,
            fraction: 12_345_678,
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08}", self.whole, self.fraction)
    }
}

impl FromStr for Seed {
    type Err = BonsaiError;

    /// Parses `whole.fraction`. Fractions longer than eight digits are
    /// truncated, shorter ones are right-padded with zeros.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = |why: &str| BonsaiError::InvalidSeed(format!("{text:?}: {why}"));

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a non-negative decimal number"));
        }

        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().map_err(|_| invalid("integer part out of range"))?
        };

        let mut digits: String = fraction.chars().take(DIGITS).collect();
        while digits.len() < DIGITS {
            digits.push('0');
        }
        let fraction = digits.parse::<u32>().map_err(|_| invalid("bad fraction"))?;

        Ok(Self { whole, fraction })
    }
}

impl TryFrom<String> for Seed {
    type Error = BonsaiError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_string()
    }
}

/// The eight growth controls, one per fractional digit, each in 0..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthParams {
    pub trunk_curve: u8,
    pub curve_change: u8,
    pub branch_spawn: u8,
    pub branch_dir: u8,
    pub branch_length: u8,
    pub leaf_density: u8,
    pub thickening: u8,
    pub branch_angle: u8,
}

impl GrowthParams {
    pub fn from_digits(d: [u8; DIGITS]) -> Self {
        Self {
            trunk_curve: d[0],
            curve_change: d[1],
            branch_spawn: d[2],
            branch_dir: d[3],
            branch_length: d[4],
            leaf_density: d[5],
            thickening: d[6],
            branch_angle: d[7],
        }
    }

    /// Initial sideways bias of the leader
    pub fn initial_curve(&self) -> i32 {
        if self.trunk_curve >= 5 {
            1
        } else {
            -1
        }
    }

    /// Trunk life interval between curve flips
    pub fn curve_period(&self) -> i32 {
        3 + (self.curve_change as f64 * 0.8).floor() as i32
    }

    /// Percent chance per step that the trunk sprouts a branch
    pub fn branch_chance(&self) -> i64 {
        (50 + self.branch_spawn as i64 * 100 / 12).min(100)
    }

    /// Horizontal heading of branches leaving the trunk
    pub fn branch_heading(&self) -> i32 {
        if self.branch_dir >= 5 {
            1
        } else {
            -1
        }
    }

    /// Life of a foliage spawner left behind by a branch
    pub fn foliage_life(&self) -> i32 {
        6 + self.leaf_density as i32 / 2
    }

    pub fn leaf_radius(&self) -> i32 {
        2 + self.leaf_density as i32 / 5
    }

    /// Leaf placement attempts per spawner per step
    pub fn leaf_attempts(&self) -> i32 {
        3 + (self.leaf_density as f64 * 0.8).floor() as i32
    }
}

/// Background color in CSS HSL terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: f64,
}

impl Hsl {
    pub fn to_rgb(&self) -> [u8; 3] {
        let s = self.saturation as f64 / 100.0;
        let l = self.lightness / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue as f64 / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}
