//! Character-surface rendering for the game.
//!
//! `game_view` draws a session onto an 80x24 [`Surface`]; `output` pushes a
//! surface to any [`TextOutput`]. With the `crossterm` feature the crate also
//! provides a terminal-backed output for the workstation host.

#![cfg_attr(not(any(test, feature = "crossterm")), no_std)]

pub mod game_view;
pub mod output;
#[cfg(feature = "crossterm")]
pub mod renderer;
pub mod surface;

pub use efi_tetris_core as core;
pub use efi_tetris_types as types;

pub use game_view::GameView;
pub use output::{blit, TextOutput};
#[cfg(feature = "crossterm")]
pub use renderer::{encode_line_into, TerminalOutput};
pub use surface::{Surface, VISIBLE_WIDTH};
