//! Turning a pixel set into pictures.
//!
//! Rendering is a pure function of the grown pixels and the seed. The fixed
//! foundation (root flare and the first trunk rows) is composed in here and
//! never stored with the tree.

use crate::error::Result;
use crate::grid::{Grid, Point};
use crate::pixel::{Pixel, PixelKind, PixelSet};
use crate::score::{score, TreeScore};
use crate::seed::{GrowthParams, Seed};
use image::{ImageFormat, Rgba, RgbaImage};
use std::fmt::Write as _;
use std::path::Path;

pub const ROOT: [u8; 3] = [0x5D, 0x40, 0x37];
pub const TRUNK: [u8; 3] = [0x79, 0x55, 0x48];
pub const BRANCH: [u8; 3] = [0x8D, 0x6E, 0x63];
pub const LEAF_LIGHT: [u8; 3] = [0x66, 0xBB, 0x6A];
pub const LEAF_DARK: [u8; 3] = [0x2E, 0x7D, 0x32];

const FRAME: &str = "#3b3d5c";
const LEAF_RADIUS: f64 = 0.45;

/// Root flare across the bottom row plus two rows of thick trunk above it.
pub fn foundation(grid: &Grid) -> Vec<Pixel> {
    let x = grid.trunk_column();
    let ground = grid.height - 1;

    let mut out: Vec<Pixel> = (x - 3..=x + 3)
        .map(|rx| Point::new(rx, ground))
        .filter(|&p| grid.contains(p))
        .map(|p| Pixel::new(p, PixelKind::Root))
        .collect();

    for y in [ground - 1, ground - 2] {
        out.push(Pixel::new(Point::new(x, y), PixelKind::Trunk));
        out.push(Pixel::new(Point::new(x - 1, y), PixelKind::TrunkThick));
        out.push(Pixel::new(Point::new(x + 1, y), PixelKind::TrunkThick));
    }
    out
}

/// Foundation first, then grown pixels that don't collide with it
pub fn compose(grid: &Grid, pixels: &PixelSet) -> PixelSet {
    foundation(grid).into_iter().chain(pixels.iter().copied()).collect()
}

/// Display color of a pixel. Leaves alternate between two greens on a
/// position checksum compared against the leaf density digit.
pub fn pixel_color(pixel: &Pixel, params: &GrowthParams) -> [u8; 3] {
    match pixel.kind {
        PixelKind::Root => ROOT,
        PixelKind::Trunk | PixelKind::TrunkThick => TRUNK,
        PixelKind::Branch => BRANCH,
        PixelKind::Leaf => {
            if (pixel.x * 7 + pixel.y * 13) % 10 < params.leaf_density as i32 {
                LEAF_LIGHT
            } else {
                LEAF_DARK
            }
        }
    }
}

pub fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

fn score_color(total: u32) -> &'static str {
    if total >= 75 {
        "#66BB6A"
    } else if total >= 50 {
        "#FFA726"
    } else if total >= 25 {
        "#76c7c0"
    } else {
        "#888"
    }
}

/// Render the tree as standalone SVG markup.
pub fn svg(grid: &Grid, pixels: &PixelSet, seed: &Seed) -> String {
    let params = seed.growth_params();
    let (w, h) = (grid.width, grid.height);

    let mut out = String::with_capacity(64 * (pixels.len() + 16));
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet">"#
    );
    let _ = write!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{}" stroke="{FRAME}" stroke-width="0.5"/>"#,
        seed.background()
    );

    for p in compose(grid, pixels).iter() {
        let color = hex(pixel_color(p, &params));
        if p.kind == PixelKind::Leaf {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{LEAF_RADIUS}" fill="{color}"/>"#,
                p.x as f64 + 0.5,
                p.y as f64 + 0.5
            );
        } else {
            let _ = write!(out, r#"<rect x="{}" y="{}" width="1" height="1" fill="{color}"/>"#, p.x, p.y);
        }
    }

    write_stats(&mut out, h, &score(grid, pixels));
    out.push_str("</svg>");
    out
}

fn write_stats(out: &mut String, h: i32, s: &TreeScore) {
    let accent = score_color(s.total);
    let leaf = hex(LEAF_LIGHT);
    let rows = [
        (h - 7, accent, format!("⌛{:>5}", s.age)),
        (h - 5, accent, format!("🌱{:>5}", s.branches)),
        (h - 3, leaf.as_str(), format!("🍀{:>5}", s.foliage)),
        (h - 1, accent, format!("⭐{:>5}/100", s.total)),
    ];
    for (y, fill, text) in rows {
        let _ = write!(
            out,
            r#"<text x="1" y="{y}" font-family="monospace" font-size="1.2" font-weight="bold" fill="{fill}">{text}</text>"#
        );
    }
}

/// Rasterize the composed tree, `scale` image pixels per grid cell. Stats
/// text is not drawn.
pub fn raster(grid: &Grid, pixels: &PixelSet, seed: &Seed, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let params = seed.growth_params();
    let [br, bg, bb] = seed.background().to_rgb();
    let mut img = RgbaImage::from_pixel(
        grid.width as u32 * scale,
        grid.height as u32 * scale,
        Rgba([br, bg, bb, 255]),
    );

    let radius = LEAF_RADIUS * scale as f64;
    let center = scale as f64 / 2.0;

    for p in compose(grid, pixels).iter() {
        let [r, g, b] = pixel_color(p, &params);
        let color = Rgba([r, g, b, 255]);
        let (ox, oy) = (p.x as u32 * scale, p.y as u32 * scale);
        for j in 0..scale {
            for i in 0..scale {
                if p.kind == PixelKind::Leaf {
                    let dx = i as f64 + 0.5 - center;
                    let dy = j as f64 + 0.5 - center;
                    if (dx * dx + dy * dy).sqrt() > radius {
                        continue;
                    }
                }
                img.put_pixel(ox + i, oy + j, color);
            }
        }
    }
    img
}

pub fn write_png(path: &Path, grid: &Grid, pixels: &PixelSet, seed: &Seed, scale: u32) -> Result<()> {
    raster(grid, pixels, seed, scale).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
