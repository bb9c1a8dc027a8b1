mod common;

use std::cell::Cell;

use common::Always;

use efi_tetris::core::{CycleCounter, GameSession};
use efi_tetris::engine::{Clock, FrameDriver};
use efi_tetris::input::KeySource;
use efi_tetris::term::TextOutput;
use efi_tetris::types::{DeviceError, KeyEvent, ScanCode, SURFACE_HEIGHT};

/// A clock where waiting takes no time.
#[derive(Default)]
struct InstantClock {
    now: Cell<u64>,
    stalled_us: u64,
}

impl CycleCounter for InstantClock {
    fn cycles(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for InstantClock {
    fn stall(&mut self, micros: u64) -> Result<(), DeviceError> {
        self.stalled_us += micros;
        // 1 GHz counter.
        self.now.set(self.now.get() + micros * 1_000);
        Ok(())
    }

    fn wait_until(&mut self, deadline: u64) -> Result<(), DeviceError> {
        self.now.set(self.now.get().max(deadline));
        Ok(())
    }
}

/// Stays silent for `frames` polls, then presses Escape.
struct EscapeAfter {
    frames: u32,
}

impl KeySource for EscapeAfter {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, DeviceError> {
        if self.frames == 0 {
            self.frames = u32::MAX;
            return Ok(Some(KeyEvent::special(ScanCode::ESCAPE)));
        }
        self.frames = self.frames.saturating_sub(1);
        Ok(None)
    }
}

#[derive(Default)]
struct Screen {
    rows: Vec<String>,
    writes: usize,
    clears: usize,
}

impl TextOutput for Screen {
    fn clear_screen(&mut self) -> Result<(), DeviceError> {
        self.clears += 1;
        Ok(())
    }

    fn write_line_at(&mut self, row: usize, text: &str) -> Result<(), DeviceError> {
        if self.rows.len() < SURFACE_HEIGHT {
            self.rows.resize(SURFACE_HEIGHT, String::new());
        }
        self.rows[row] = text.to_string();
        self.writes += 1;
        Ok(())
    }
}

#[test]
fn driver_plays_until_game_over_then_exits_on_escape() {
    let mut clock = InstantClock::default();
    let mut screen = Screen::default();
    let keys = EscapeAfter { frames: 6_000 };

    let mut driver = FrameDriver::new(keys, &mut screen, &mut clock, GameSession::new(Always(0)))
        .with_calibration_micros(1_000);
    let score = driver.run().unwrap();

    assert_eq!(score, 0);
    assert!(driver.session().game_over());
    assert_eq!(driver.frames(), 6_000);
    assert_eq!(driver.ticks_per_second(), 1_000_000_000);
    drop(driver);

    assert_eq!(screen.clears, 1);
    assert_eq!(screen.writes, 6_000 * SURFACE_HEIGHT);
    assert!(screen.rows[14][15..].starts_with("[GAME OVER!]"));
    assert_eq!(clock.stalled_us, 1_000);
}
