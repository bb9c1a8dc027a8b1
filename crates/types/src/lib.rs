//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies so it can be linked
//! into the terminal host and into the `no_std` UEFI application alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 18 rows (indexed 0-17)
//! - **Spawn position**: (3, 0), rotation 0
//!
//! # Timing
//!
//! The game advances in fixed logical ticks at [`FRAMERATE`] ticks per second.
//! Every duration in the rules is expressed in ticks, never in wall time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMERATE` | 60 | Logical ticks per second |
//! | `CLEAR_ANIMATION_STEPS` | 6 | Blink steps before completed rows vanish |
//! | `CLEAR_ANIMATION_STEP_TICKS` | 20 | Ticks per blink step |
//! | `FRAME_AVERAGE_WINDOW` | 15 | Frames per frame-time average |
//!
//! # Examples
//!
//! ```
//! use efi_tetris_types::{KeyEvent, ScanCode, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let esc = KeyEvent::special(ScanCode::ESCAPE);
//! assert!(esc.is_escape());
//!
//! let x = KeyEvent::printable('x');
//! assert_eq!(x.ch, Some('x'));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 18);
//! ```

#![no_std]

use core::fmt;

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (18 rows)
pub const FIELD_HEIGHT: usize = 18;

/// Side of the square window every piece rotation is drawn in.
pub const PIECE_WINDOW: usize = 4;

/// Maximum number of distinct rotation states of a piece.
pub const MAX_ROTATIONS: usize = 4;

/// Number of pieces in the catalog.
pub const PIECE_COUNT: usize = 7;

/// Spawn offset of a fresh piece (top-left of its 4x4 window).
pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = 0;

/// Render surface dimensions. The last column of every row is a terminator.
pub const SURFACE_WIDTH: usize = 80;
pub const SURFACE_HEIGHT: usize = 24;

/// Logical tick rate (ticks per second).
pub const FRAMERATE: u32 = 60;

/// Nominal duration of one frame in microseconds.
pub const TARGET_FRAME_MICROS: u64 = 1_000_000 / FRAMERATE as u64;

/// Number of blink steps a completed row shows before it is deleted.
pub const CLEAR_ANIMATION_STEPS: u32 = 6;

/// Length of one blink step in ticks.
pub const CLEAR_ANIMATION_STEP_TICKS: u32 = FRAMERATE / 3;

/// Number of frames folded into one frame-time average (a quarter second).
pub const FRAME_AVERAGE_WINDOW: u32 = FRAMERATE / 4;

/// Number of difficulty tiers.
pub const DIFFICULTY_TIERS: usize = 7;

/// Elapsed game time (seconds) at which each difficulty tier begins.
pub const TIER_START_SECONDS: [u32; DIFFICULTY_TIERS] = [0, 60, 180, 300, 600, 1200, 2700];

/// Gravity interval per tier, in ticks per row.
pub const FALLING_SPEEDS: [u32; DIFFICULTY_TIERS] = [50, 40, 30, 20, 10, 5, 4];

/// Points awarded for each cleared row, per tier.
pub const SCORE_PER_LINE: [u64; DIFFICULTY_TIERS] = [100, 250, 500, 1000, 2500, 5000, 10000];

/// Cell on the field (None = empty, Some = glyph of the piece that locked there)
pub type Cell = Option<char>;

/// Firmware-style scan code of a non-printable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScanCode(pub u16);

impl ScanCode {
    pub const NULL: ScanCode = ScanCode(0x00);
    pub const UP: ScanCode = ScanCode(0x01);
    pub const DOWN: ScanCode = ScanCode(0x02);
    pub const RIGHT: ScanCode = ScanCode(0x03);
    pub const LEFT: ScanCode = ScanCode(0x04);
    pub const ESCAPE: ScanCode = ScanCode(0x17);
}

/// One keystroke as reported by the input device.
///
/// Mirrors the firmware key record: special keys carry a scan code and no
/// character, printable keys carry [`ScanCode::NULL`] and a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyEvent {
    pub scan_code: ScanCode,
    pub ch: Option<char>,
}

impl KeyEvent {
    pub const fn special(scan_code: ScanCode) -> Self {
        Self { scan_code, ch: None }
    }

    pub const fn printable(ch: char) -> Self {
        Self {
            scan_code: ScanCode::NULL,
            ch: Some(ch),
        }
    }

    pub fn is_escape(&self) -> bool {
        self.scan_code == ScanCode::ESCAPE
    }
}

/// Player input resolved for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TickInput {
    /// Horizontal move, -1..=1.
    pub dx: i32,
    /// Soft drop, 0..=1.
    pub dy: i32,
    /// Rotation step, -1 (counter-clockwise) ..= 1 (clockwise).
    pub rotation: i32,
}

impl TickInput {
    pub const NONE: TickInput = TickInput {
        dx: 0,
        dy: 0,
        rotation: 0,
    };

    pub const fn new(dx: i32, dy: i32, rotation: i32) -> Self {
        Self { dx, dy, rotation }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Unrecoverable failure reported by an input, output or timer device.
///
/// `domain` names the failing operation, `code` carries the device status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceError {
    pub domain: &'static str,
    pub code: u64,
}

impl DeviceError {
    pub const fn new(domain: &'static str, code: u64) -> Self {
        Self { domain, code }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FATAL ERROR: {}: code {:#x}", self.domain, self.code)
    }
}

impl core::error::Error for DeviceError {}
