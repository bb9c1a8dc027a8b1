//! Terminal host (default binary).
//!
//! Runs the same frame driver the firmware image runs, with crossterm for
//! keys and screen and a nanosecond clock standing in for the cycle counter.

use std::fs::OpenOptions;

use anyhow::{Context, Result};

use efi_tetris::core::{CounterRng, GameSession};
use efi_tetris::engine::{FrameDriver, StdClock};
use efi_tetris::input::TerminalKeys;
use efi_tetris::term::TerminalOutput;
use efi_tetris::HostConfig;

fn main() -> Result<()> {
    let config = HostConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalOutput::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    let score = result?;
    println!("Final score: {:08}", score);
    Ok(())
}

fn run(term: &mut TerminalOutput, config: &HostConfig) -> Result<u64> {
    let clock = StdClock::new();
    let session = GameSession::new(CounterRng::new(clock));
    let mut driver = FrameDriver::new(TerminalKeys::new(), term, clock, session)
        .with_calibration_micros(config.calibration_micros());

    Ok(driver.run()?)
}

/// Log to the configured file; stderr would tear the game screen.
fn init_logging(config: &HostConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("logging to {}", path);
    Ok(())
}
