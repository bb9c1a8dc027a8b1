//! efi-tetris (workspace facade crate).
//!
//! Re-exports the game crates under `efi_tetris::{core,engine,input,term,types}`
//! and carries the terminal host's configuration.

pub mod config;

pub use efi_tetris_core as core;
pub use efi_tetris_engine as engine;
pub use efi_tetris_input as input;
pub use efi_tetris_term as term;
pub use efi_tetris_types as types;

pub use config::HostConfig;
