//! Headless brickfall runner (default binary).
//!
//! Drives the engine the way a front end would: a fixed-timestep loop feeds
//! gravity ticks and "key presses" from a random autoplayer, polls the
//! garbage scheduler, and prints the final field. There is no rendering or
//! input device here; it exists to exercise the engine end to end.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;

use brickfall::core::{
    Board, BoardConfig, Game, GarbageConfig, GarbageScheduler, ManualClock, SimpleRng,
};
use brickfall::types::{EventSource, Grid, HIDDEN_ROWS};

/// Fixed timestep interval in milliseconds (~60 FPS)
const TICK_MS: u64 = 16;

#[derive(Debug, Parser)]
#[command(name = "brickfall", about = "Run a headless brickfall game with a random autoplayer")]
struct Cli {
    /// Seed for the bag, garbage and autoplayer RNGs (default: clock-derived)
    #[arg(long)]
    seed: Option<u32>,

    /// Maximum number of 16ms ticks to simulate
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,

    /// Enable timed garbage rows
    #[arg(long)]
    garbage: bool,

    /// Number of upcoming bricks kept in the preview queue
    #[arg(long, default_value_t = 3)]
    preview: usize,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

/// Moves the autoplayer still wants to make for the current brick
#[derive(Debug)]
struct Plan {
    rotations: u32,
    shift: i32,
}

impl Plan {
    fn random(rng: &mut SimpleRng, cols: usize) -> Self {
        let half = (cols / 2) as i32;
        Self {
            rotations: rng.next_range(4),
            shift: rng.next_range(cols as u32) as i32 - half,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(cli.log_level))
        .init();

    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the unix epoch")?
            .subsec_nanos(),
    };
    info!(seed, ticks = cli.ticks, garbage = cli.garbage, "starting");

    let board = Board::with_config(BoardConfig::default().seed(seed).preview_size(cli.preview))
        .context("invalid board configuration")?;
    let clock = ManualClock::new();
    let garbage = GarbageScheduler::with_clock(
        GarbageConfig {
            enabled: cli.garbage,
            seed: seed.wrapping_add(1),
            ..GarbageConfig::default()
        },
        clock.clone(),
    );

    let mut game = Game::with_parts(board, garbage);
    game.new_game();

    run(&mut game, &clock, seed, cli.ticks)?;

    info!(
        score = game.score(),
        lines = game.lines(),
        level = game.level(),
        status = game.status().as_str(),
        "finished"
    );
    print_field(&game.board().board_matrix());
    Ok(())
}

fn run(game: &mut Game<ManualClock>, clock: &ManualClock, seed: u32, ticks: u64) -> Result<()> {
    let mut rng = SimpleRng::new(seed.rotate_left(16));
    let cols = game.board().cols();
    let mut plan = Plan::random(&mut rng, cols);
    let mut gravity_ms: u64 = 0;

    for tick in 0..ticks {
        if game.is_game_over() {
            info!(tick, "game over");
            break;
        }

        clock.advance(TICK_MS);

        // One "key press" per tick while the plan has moves left
        if plan.rotations > 0 {
            game.on_rotate_event()?;
            plan.rotations -= 1;
        } else if plan.shift < 0 {
            game.on_left_event()?;
            plan.shift += 1;
        } else if plan.shift > 0 {
            game.on_right_event()?;
            plan.shift -= 1;
        } else if rng.next_range(8) == 0 {
            game.on_hard_drop()?;
            plan = Plan::random(&mut rng, cols);
            gravity_ms = 0;
        }

        gravity_ms += TICK_MS;
        if gravity_ms >= u64::from(game.drop_interval_ms()) {
            gravity_ms = 0;
            let data = game.on_down_event(EventSource::Timer)?;
            if let Some(clear) = data.clear_row {
                if clear.lines_removed > 0 {
                    debug!(lines = clear.lines_removed, score = game.score(), "cleared");
                }
                plan = Plan::random(&mut rng, cols);
            }
        }

        if game.poll_garbage()? {
            info!(tick, "topped out by garbage");
        }
    }
    Ok(())
}

fn print_field(grid: &Grid) {
    for row in grid.visible_rows(HIDDEN_ROWS) {
        let line: String = row
            .iter()
            .map(|&c| if c == 0 { '.' } else { char::from(b'0' + c) })
            .collect();
        println!("{line}");
    }
}
