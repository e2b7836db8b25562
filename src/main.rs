mod commands;
mod config;
mod garden;
mod help;
mod settings;
mod terminal;

use clap::{Parser, Subcommand};
use config::{ExportConfig, GardenConfig};
use pixelbonsai::store::TreeStore;
use pixelbonsai::{Grid, Result, Seed};
use settings::Settings;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixelbonsai")]
#[command(version)]
#[command(about = "Deterministic pixel bonsai grown from an eight-digit seed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a bonsai grow in the terminal
    Grow {
        /// Seed whose eight fractional digits drive growth
        #[arg(short, long, default_value = "2.12345678")]
        seed: Seed,

        /// Square grid side (8-256)
        #[arg(short, long)]
        grid: Option<i32>,

        /// Draw a fresh random seed for every step
        #[arg(short = 'W', long)]
        wander: bool,

        /// Seed for the --wander and replant generator
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Keep planting new trees
        #[arg(short, long)]
        infinite: bool,

        /// Print the grown tree to stdout (no interactive display)
        #[arg(short, long)]
        print: bool,

        /// Stop after this many steps
        #[arg(short = 'n', long)]
        steps: Option<u64>,

        /// Seconds between growth steps
        #[arg(short, long)]
        time: Option<f32>,

        /// Wait time between trees in infinite mode (seconds)
        #[arg(short, long, default_value = "4.0")]
        wait: f64,

        /// Leaf character
        #[arg(short = 'c', long)]
        leaf: Option<char>,
    },

    /// Render a grown tree as SVG
    Svg {
        #[arg(short, long, default_value = "2.12345678")]
        seed: Seed,

        #[arg(short, long)]
        grid: Option<i32>,

        /// Stop after this many steps instead of growing to maturity
        #[arg(short = 'n', long)]
        steps: Option<u64>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a grown tree as PNG
    Png {
        #[arg(short, long, default_value = "2.12345678")]
        seed: Seed,

        #[arg(short, long)]
        grid: Option<i32>,

        #[arg(short = 'n', long)]
        steps: Option<u64>,

        /// Image pixels per grid cell
        #[arg(long)]
        scale: Option<u32>,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Show the growth parameters a seed decodes to
    Digits {
        seed: Seed,
    },

    /// Plant a new stored bonsai
    Mint {
        #[arg(short, long, default_value = "2.12345678")]
        seed: Seed,

        #[arg(short, long)]
        grid: Option<i32>,

        /// Water this many times right away
        #[arg(short = 'n', long, default_value = "0")]
        steps: u64,
    },

    /// Apply growth steps to a stored bonsai
    Water {
        token_id: u64,

        #[arg(short, long, default_value = "2.12345678")]
        seed: Seed,

        #[arg(short = 'n', long, default_value = "1")]
        times: u64,
    },

    /// Print a stored bonsai's metadata as JSON
    Show {
        token_id: u64,
    },

    /// Delete a stored bonsai
    Burn {
        token_id: u64,
    },

    /// List stored bonsai
    List,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixelbonsai=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn grid_from(side: Option<i32>, settings: &Settings) -> Result<Grid> {
    match side.or(settings.garden.grid) {
        Some(side) => Grid::square(side),
        None => Ok(Grid::default()),
    }
}

fn open_store(settings: &Settings) -> Result<TreeStore> {
    let dir = settings.store.dir.clone().unwrap_or_else(TreeStore::default_dir);
    TreeStore::open(dir)
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();

    match cli.command {
        Commands::Grow {
            seed,
            grid,
            wander,
            rng_seed,
            infinite,
            print,
            steps,
            time,
            wait,
            leaf,
        } => {
            let config = GardenConfig {
                infinite,
                print,
                time_step: time.or(settings.garden.step_delay).unwrap_or(0.05),
                time_wait: wait,
                grid: grid_from(grid, &settings)?,
                seed,
                wander,
                rng_seed,
                max_steps: steps,
                leaf: leaf.or(settings.garden.leaf).unwrap_or('&'),
            };
            garden::run(config)
        }
        Commands::Svg { seed, grid, steps, out } => {
            let config = ExportConfig {
                grid: grid_from(grid, &settings)?,
                seed,
                steps,
                out,
                scale: 1,
            };
            commands::export_svg(&config)
        }
        Commands::Png {
            seed,
            grid,
            steps,
            scale,
            out,
        } => {
            let config = ExportConfig {
                grid: grid_from(grid, &settings)?,
                seed,
                steps,
                out: None,
                scale: scale.or(settings.export.png_scale).unwrap_or(10),
            };
            commands::export_png(&config, &out)
        }
        Commands::Digits { seed } => {
            commands::print_digits(&seed);
            Ok(())
        }
        Commands::Mint { seed, grid, steps } => {
            let store = open_store(&settings)?;
            commands::mint(&store, grid_from(grid, &settings)?, seed, steps)
        }
        Commands::Water { token_id, seed, times } => {
            commands::water(&open_store(&settings)?, token_id, seed, times)
        }
        Commands::Show { token_id } => commands::show(&open_store(&settings)?, token_id),
        Commands::Burn { token_id } => commands::burn(&open_store(&settings)?, token_id),
        Commands::List => commands::list(&open_store(&settings)?),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
