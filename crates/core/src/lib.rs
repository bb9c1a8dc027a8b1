//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the state machine. It has **no**
//! dependency on a console, a clock or an allocator, which makes it:
//!
//! - **Portable**: links into the terminal host and into a `no_std` UEFI image
//! - **Testable**: every rule is exercised by unit tests with scripted input
//! - **Deterministic**: given the same random words, the same game unfolds
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven piece shapes and their rotation masks
//! - [`field`]: 10x18 grid with collision detection and row deletion
//! - [`rng`]: counter-mixing generator used for piece selection
//! - [`rules`]: difficulty tiers, gravity intervals and line-clear scoring
//! - [`session`]: the tick-driven state machine
//!
//! # Example
//!
//! ```
//! use efi_tetris_core::{GameSession, Phase, SimpleRng};
//! use efi_tetris_core::types::TickInput;
//!
//! let mut game = GameSession::new(SimpleRng::new(12345));
//!
//! // Shift right and rotate in a single tick.
//! game.tick(TickInput::new(1, 0, 1));
//!
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.ticks(), 1);
//! ```
//!
//! # Timing
//!
//! There is no wall clock in here. One call to
//! [`GameSession::tick`](session::GameSession::tick) is one logical tick;
//! the frame driver is responsible for calling it at the target rate.

#![cfg_attr(not(test), no_std)]

pub mod catalog;
pub mod field;
pub mod rng;
pub mod rules;
pub mod session;

pub use efi_tetris_types as types;

// Re-export commonly used types for convenience
pub use catalog::{cells, occupied, rotation_count_of, PieceDef, PieceKind, CATALOG};
pub use field::Field;
pub use rng::{CounterRng, CycleCounter, RandomSource, SimpleRng};
pub use rules::Rules;
pub use session::{ActivePiece, GameSession, Phase};
