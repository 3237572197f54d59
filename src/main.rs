//! Dune Roll headless runner
//!
//! Runs the full state machine against the in-memory display with a scripted
//! button pattern, then prints a JSON session summary. `RUST_LOG` controls
//! the log output.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use dune_roll::game::Snapshot;
use dune_roll::platform::{FixedSwitches, MemoryDisplay, RecordingScoreDisplay, ScriptedInput};
use dune_roll::sim::Phase;
use dune_roll::{Game, Peripherals};

const SESSION_TICKS: u64 = 3_000;
const HOLD_TICKS: usize = 20;
const RELEASE_TICKS: usize = 12;
/// Lowest switch set: orange ball
const SWITCHES: u32 = 1 << 2;

#[derive(Serialize)]
struct SessionSummary {
    seed: u64,
    ticks: u64,
    runs: u32,
    best_score: u32,
    buffer_swaps: u64,
    pixel_writes: u64,
    last: Snapshot,
}

/// Hold the button, then let go, forever. Every cycle starts with a press,
/// which also starts and restarts runs.
fn button_script() -> Vec<bool> {
    let mut script = vec![true; HOLD_TICKS];
    script.extend(std::iter::repeat_n(false, RELEASE_TICKS));
    script
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    log::info!("Dune Roll (headless) starting, seed {seed}");

    let mut game = Game::new(seed);
    let mut display = MemoryDisplay::new();
    let mut input = ScriptedInput::repeating(button_script());
    let mut switches = FixedSwitches(SWITCHES);
    let mut scores = RecordingScoreDisplay::default();

    game.power_on(&mut display);

    let mut runs = 0;
    let mut best_score = 0;
    let mut last_phase = game.phase();
    for _ in 0..SESSION_TICKS {
        let phase = game.tick(&mut Peripherals {
            display: &mut display,
            input: &mut input,
            color_select: &mut switches,
            score_display: &mut scores,
        });
        if phase == Phase::Playing && last_phase != Phase::Playing {
            runs += 1;
        }
        best_score = best_score.max(game.world().score.points);
        last_phase = phase;
    }

    let summary = SessionSummary {
        seed,
        ticks: game.ticks(),
        runs,
        best_score,
        buffer_swaps: display.swaps(),
        pixel_writes: display.writes(),
        last: game.snapshot(),
    };
    log::info!(
        "Session finished: {} runs, best score {}, last phase {:?}",
        runs,
        best_score,
        game.phase()
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize session summary: {e}"),
    }
}
