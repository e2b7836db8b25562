use crate::config::{GardenConfig, MATURITY_LIMIT};
use crate::help::{show_help_modal, Bindings};
use crate::terminal::{rgb, Terminal};
use crossterm::event::KeyCode;
use crossterm::style::Color;
use pixelbonsai::render::{compose, pixel_color};
use pixelbonsai::seed::UNIT;
use pixelbonsai::{PixelKind, Result, Seed, SimulationState};
use rand::prelude::*;
use tracing::debug;

const HELP_TITLE: &str = "PIXEL BONSAI";
const HELP: Bindings = &[
    ("space", "Pause / resume"),
    ("w", "Water once while paused"),
    ("r", "Replant with a new seed"),
    ("q/Esc", "Quit"),
    ("?", "Close help"),
];

/// Terminal columns per grid cell (cells are roughly twice as tall as wide)
const CELL_COLUMNS: i32 = 2;
const PANEL_WIDTH: i32 = 24;
const PANEL_ROWS: i32 = 8;

/// What the panel reports about the tree
#[derive(Clone, Copy, PartialEq)]
enum Status {
    Growing,
    Paused,
    Mature,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Growing => "growing",
            Status::Paused => "paused",
            Status::Mature => "max height reached",
        }
    }
}

/// Run the garden
pub fn run(config: GardenConfig) -> Result<()> {
    let rng_seed = config.rng_seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0) // Fallback seed for misconfigured system clocks
    });
    let mut rng = StdRng::seed_from_u64(rng_seed);

    if config.print {
        run_print_mode(&config, &mut rng)
    } else {
        run_interactive(&config, &mut rng)
    }
}

/// Random balance-like seed with a whole part in 0..10, the way auto-grow
/// varies the balance between steps
fn random_seed(rng: &mut StdRng) -> Seed {
    Seed::from_e8s(rng.gen_range(0..10 * UNIT))
}

fn step_seed(config: &GardenConfig, rng: &mut StdRng) -> Seed {
    if config.wander {
        random_seed(rng)
    } else {
        config.seed
    }
}

fn step_budget(config: &GardenConfig) -> u64 {
    config.max_steps.unwrap_or(MATURITY_LIMIT)
}

fn run_print_mode(config: &GardenConfig, rng: &mut StdRng) -> Result<()> {
    let mut seed = config.seed;

    loop {
        let mut tree = SimulationState::initialize(config.grid, seed);
        while tree.can_grow() && tree.step < step_budget(config) {
            tree = tree.advance(step_seed(config, rng));
        }

        let width = config.grid.width * CELL_COLUMNS + PANEL_WIDTH + 2;
        let height = config.grid.height.max(PANEL_ROWS + 2);
        let mut term = Terminal::offscreen(width as u16, height as u16);
        draw_tree(&mut term, &tree, config.leaf, (0, 0));
        draw_panel(&mut term, &tree, status_of(&tree, false), (config.grid.width * CELL_COLUMNS + 2, 0));
        term.print_to_stdout()?;

        if !config.infinite {
            break;
        }

        std::thread::sleep(std::time::Duration::from_secs_f64(config.time_wait));
        seed = random_seed(rng);
    }

    Ok(())
}

fn run_interactive(config: &GardenConfig, rng: &mut StdRng) -> Result<()> {
    let mut term = Terminal::new(true)?;
    let mut seed = config.seed;

    'trees: loop {
        let mut tree = SimulationState::initialize(config.grid, seed);
        let mut paused = false;
        term.clear_screen()?;

        // Grow one step per tick until the tree matures
        loop {
            draw_frame(&mut term, &tree, config, status_of(&tree, paused));
            term.present()?;

            if let Some((code, _)) = term.check_key()? {
                match code {
                    KeyCode::Char('?') => {
                        if show_help_modal(&mut term, HELP_TITLE, HELP)? {
                            break 'trees;
                        }
                    }
                    KeyCode::Char('q') | KeyCode::Esc => break 'trees,
                    KeyCode::Char(' ') => paused = !paused,
                    KeyCode::Char('w') if paused && tree.can_grow() => {
                        tree = tree.advance(step_seed(config, rng));
                    }
                    KeyCode::Char('r') => {
                        seed = random_seed(rng);
                        debug!(seed = %seed, "replanting");
                        continue 'trees;
                    }
                    _ => {}
                }
            }

            if !tree.can_grow() || tree.step >= step_budget(config) {
                break;
            }
            if !paused {
                tree = tree.advance(step_seed(config, rng));
            }
            term.sleep(config.time_step);
        }

        draw_frame(&mut term, &tree, config, Status::Mature);
        term.present()?;

        if !config.infinite {
            // Wait for keypress to exit
            loop {
                if let Some(code) = term.wait_key(100)? {
                    match code {
                        KeyCode::Char('?') => {
                            if show_help_modal(&mut term, HELP_TITLE, HELP)? {
                                break;
                            }
                        }
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        _ => {}
                    }
                }
            }
            break;
        }

        // Infinite mode: wait between trees
        let wait_ms = (config.time_wait * 1000.0) as u64;
        if let Some(code) = term.wait_key(wait_ms)? {
            match code {
                KeyCode::Char('?') => {
                    if show_help_modal(&mut term, HELP_TITLE, HELP)? {
                        break;
                    }
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            }
        }

        seed = random_seed(rng);
    }

    Ok(())
}

fn status_of(tree: &SimulationState, paused: bool) -> Status {
    if !tree.can_grow() {
        Status::Mature
    } else if paused {
        Status::Paused
    } else {
        Status::Growing
    }
}

/// Center the canvas and its panel in the terminal
fn draw_frame(term: &mut Terminal, tree: &SimulationState, config: &GardenConfig, status: Status) {
    term.clear();
    let (width, height) = term.size();
    let canvas_w = config.grid.width * CELL_COLUMNS;
    let x = ((width as i32 - canvas_w - PANEL_WIDTH - 2) / 2).max(0);
    let y = ((height as i32 - config.grid.height) / 2).max(0);

    draw_tree(term, tree, config.leaf, (x, y));
    draw_panel(term, tree, status, (x + canvas_w + 2, y));
}

fn draw_tree(term: &mut Terminal, tree: &SimulationState, leaf: char, (ox, oy): (i32, i32)) {
    let grid = tree.grid;
    let params = tree.seed.growth_params();
    let background = Some(rgb(tree.seed.background().to_rgb()));

    for y in 0..grid.height {
        for x in 0..grid.width * CELL_COLUMNS {
            term.paint(ox + x, oy + y, ' ', None, background);
        }
    }

    for pixel in compose(&grid, &tree.pixels).iter() {
        let color = rgb(pixel_color(pixel, &params));
        let (cx, cy) = (ox + pixel.x * CELL_COLUMNS, oy + pixel.y);
        if pixel.kind == PixelKind::Leaf {
            term.paint(cx, cy, leaf, Some(color), background);
        } else {
            term.paint(cx, cy, ' ', None, Some(color));
            term.paint(cx + 1, cy, ' ', None, Some(color));
        }
    }
}

fn draw_panel(term: &mut Terminal, tree: &SimulationState, status: Status, (px, py): (i32, i32)) {
    let score = tree.score();
    let digits: String = tree.seed.digits().iter().map(|d| char::from(b'0' + d)).collect();
    let lines = [
        format!("seed     {}", tree.seed),
        format!("digits   {digits}"),
        format!("step     {}", tree.step),
        format!("age      {}", score.age),
        format!("branches {}", score.branches),
        format!("foliage  {}", score.foliage),
        format!("score    {}/100", score.total),
        status.label().to_string(),
    ];

    let border = Some(Color::White);
    let inner = PANEL_WIDTH - 2;
    let bottom = py + lines.len() as i32 + 1;

    term.set(px, py, '+', border, false);
    term.set(px + PANEL_WIDTH - 1, py, '+', border, false);
    term.set(px, bottom, '+', border, false);
    term.set(px + PANEL_WIDTH - 1, bottom, '+', border, false);
    for i in 1..PANEL_WIDTH - 1 {
        term.set(px + i, py, '-', border, false);
        term.set(px + i, bottom, '-', border, false);
    }

    for (i, line) in lines.iter().enumerate() {
        let y = py + 1 + i as i32;
        let text: String = line.chars().take(inner as usize - 1).collect();
        let (fg, bold) = if i == lines.len() - 1 {
            (status_color(status), true)
        } else {
            (Color::Grey, false)
        };
        term.set(px, y, '|', border, false);
        term.set_str(px + 2, y, &text, Some(fg), bold);
        term.set(px + PANEL_WIDTH - 1, y, '|', border, false);
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Growing => Color::Green,
        Status::Paused => Color::Yellow,
        Status::Mature => Color::Cyan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelbonsai::Grid;

    fn config() -> GardenConfig {
        GardenConfig {
            infinite: false,
            print: true,
            time_step: 0.0,
            time_wait: 0.0,
            grid: Grid::default(),
            seed: Seed::default(),
            wander: false,
            rng_seed: Some(7),
            max_steps: None,
            leaf: '&',
        }
    }

    #[test]
    fn wander_seeds_are_reproducible() {
        let mut config = config();
        config.wander = true;
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<Seed> = (0..5).map(|_| step_seed(&config, &mut a)).collect();
        let second: Vec<Seed> = (0..5).map(|_| step_seed(&config, &mut b)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|s| s.whole() < 10));
    }

    #[test]
    fn fixed_seed_without_wander() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(step_seed(&config(), &mut rng), Seed::default());
    }

    #[test]
    fn tree_draws_foundation_and_panel() {
        let config = config();
        let tree = SimulationState::initialize(config.grid, config.seed);
        let mut term = Terminal::offscreen(100, 32);
        draw_tree(&mut term, &tree, '&', (0, 0));
        draw_panel(&mut term, &tree, Status::Growing, (66, 0));

        // root color as a background on the bottom row
        assert!(term.to_ansi().contains("48;2;93;64;55"));
        let text = term.plain_text();
        assert!(text.contains("seed     2.12345678"));
        assert!(text.contains("digits   12345678"));
        assert!(text.contains("growing"));
    }
}
