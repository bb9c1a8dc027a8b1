//! Frame driver: calibrated timing, pacing and the per-frame loop.
//!
//! Ties the input, core and term crates together behind three device seams
//! ([`KeySource`](input::KeySource), [`TextOutput`](term::TextOutput) and
//! [`Clock`]). The `std` feature adds [`StdClock`] for hosted builds.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod clock;
pub mod driver;
pub mod pacing;

pub use efi_tetris_core as core;
pub use efi_tetris_input as input;
pub use efi_tetris_term as term;
pub use efi_tetris_types as types;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{
    calibrate_ticks_per_second, micros_to_ticks, ticks_to_micros, Clock,
    DEFAULT_CALIBRATION_MICROS, MICROS_PER_SECOND,
};
pub use driver::{FrameDriver, FrameOutcome};
pub use pacing::FramePacer;
