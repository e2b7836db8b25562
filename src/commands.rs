use crate::config::{ExportConfig, MATURITY_LIMIT};
use pixelbonsai::metadata::TokenMetadata;
use pixelbonsai::render;
use pixelbonsai::seed::GrowthParams;
use pixelbonsai::store::{TreeRecord, TreeStore};
use pixelbonsai::{Grid, Result, Seed, SimulationState};
use std::fs;
use std::io::{stdout, Write};
use std::path::Path;
use tracing::info;

/// Grow a tree with a fixed seed for up to `limit` steps
fn grow(grid: Grid, seed: Seed, limit: u64) -> SimulationState {
    let mut tree = SimulationState::initialize(grid, seed);
    tree.grow_to_maturity(seed, limit);
    tree
}

/// Write SVG markup to the output file, or stdout without one
pub fn export_svg(config: &ExportConfig) -> Result<()> {
    let tree = grow(config.grid, config.seed, config.step_limit());
    let svg = tree.svg();
    match &config.out {
        Some(path) => {
            fs::write(path, &svg)?;
            info!(path = %path.display(), step = tree.step, "wrote svg");
        }
        None => {
            let mut out = stdout();
            out.write_all(svg.as_bytes())?;
            out.write_all(b"\n")?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn export_png(config: &ExportConfig, path: &Path) -> Result<()> {
    let tree = grow(config.grid, config.seed, config.step_limit());
    render::write_png(path, &tree.grid, &tree.pixels, &tree.seed, config.scale)?;
    info!(path = %path.display(), step = tree.step, scale = config.scale, "wrote png");
    Ok(())
}

/// Lines describing a seed's digits and the parameters they drive
pub fn digit_report(seed: &Seed) -> Vec<String> {
    let d = seed.digits();
    let p = GrowthParams::from_digits(d);
    let bg = seed.background();
    vec![
        format!("seed            {seed}"),
        format!("digits          {}", d.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" ")),
        format!("trunk curve     {} (initial curve {:+})", p.trunk_curve, p.initial_curve()),
        format!("curve change    {} (flip every {} steps)", p.curve_change, p.curve_period()),
        format!("branch spawn    {} ({}% chance)", p.branch_spawn, p.branch_chance()),
        format!("branch dir      {} (heading {:+})", p.branch_dir, p.branch_heading()),
        format!("branch length   {}", p.branch_length),
        format!(
            "leaf density    {} (life {}, radius {}, {} attempts)",
            p.leaf_density,
            p.foliage_life(),
            p.leaf_radius(),
            p.leaf_attempts()
        ),
        format!("thickening      {}", p.thickening),
        format!("branch angle    {}", p.branch_angle),
        format!("background      {bg}"),
    ]
}

pub fn print_digits(seed: &Seed) {
    for line in digit_report(seed) {
        println!("{line}");
    }
}

fn print_record(record: &TreeRecord) {
    let score = record.state.score();
    let status = if record.state.can_grow() {
        "growing"
    } else {
        "max height reached"
    };
    println!(
        "#{:<4} seed {}  steps {:>4}  score {:>3}/100  {}",
        record.token_id,
        record.state.seed,
        record.growth_steps(),
        score.total,
        status
    );
}

pub fn mint(store: &TreeStore, grid: Grid, seed: Seed, steps: u64) -> Result<()> {
    let mut record = store.mint(grid, seed)?;
    // Optional initial watering, stopping quietly once the tree matures
    for _ in 0..steps.min(MATURITY_LIMIT) {
        if !record.state.can_grow() {
            break;
        }
        record = store.water(record.token_id, seed)?;
    }
    print_record(&record);
    Ok(())
}

pub fn water(store: &TreeStore, token_id: u64, seed: Seed, times: u64) -> Result<()> {
    let mut record = store.load(token_id)?;
    // A tree that is already dormant is an error; one that matures partway
    // through stops quietly, like `mint`
    for n in 0..times.min(MATURITY_LIMIT) {
        if n > 0 && !record.state.can_grow() {
            break;
        }
        record = store.water(token_id, seed)?;
    }
    print_record(&record);
    Ok(())
}

pub fn show(store: &TreeStore, token_id: u64) -> Result<()> {
    let record = store.load(token_id)?;
    let metadata = TokenMetadata::from(&record);
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

pub fn burn(store: &TreeStore, token_id: u64) -> Result<()> {
    store.burn(token_id)?;
    println!("burned #{token_id}");
    Ok(())
}

pub fn list(store: &TreeStore) -> Result<()> {
    let records = store.list()?;
    if records.is_empty() {
        println!("no bonsai in {}", store.root().display());
    }
    for record in &records {
        print_record(record);
    }
    Ok(())
}
