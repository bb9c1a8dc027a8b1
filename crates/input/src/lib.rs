//! Input module (engine-facing).
//!
//! Maps firmware-style key events into per-tick move requests. The mapping
//! and the per-frame drain are independent of any device; the `crossterm`
//! feature adds a terminal key source for the workstation host.

#![cfg_attr(not(any(test, feature = "crossterm")), no_std)]

pub mod handler;
pub mod map;
#[cfg(feature = "crossterm")]
pub mod terminal;

pub use efi_tetris_types as types;

pub use handler::{FrameInput, InputHandler, KeySource};
pub use map::{map_key, should_quit, KeyCommand};
#[cfg(feature = "crossterm")]
pub use terminal::{from_crossterm, TerminalKeys};
