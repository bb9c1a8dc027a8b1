//! Helpers shared by the integration tests.

#![allow(dead_code)]

use efi_tetris::core::{GameSession, RandomSource};
use efi_tetris::types::TickInput;

/// Always draws the same catalog index.
pub struct Always(pub u64);

impl RandomSource for Always {
    fn next_word(&mut self) -> u64 {
        self.0
    }
}

pub fn filled<R: RandomSource>(s: &GameSession<R>) -> usize {
    s.field().cells().iter().filter(|c| c.is_some()).count()
}

/// Shift the active piece to column offset `x`, soft-drop it and let gravity
/// lock it.
pub fn drop_at<R: RandomSource>(s: &mut GameSession<R>, x: i32) {
    let before = filled(s);
    while s.active().x != x {
        let dx = (x - s.active().x).signum();
        s.tick(TickInput::new(dx, 0, 0));
    }
    loop {
        let y = s.active().y;
        s.tick(TickInput::new(0, 1, 0));
        if filled(s) != before || s.game_over() {
            return;
        }
        if s.active().y == y {
            // Resting: holding down never locks, gravity does.
            while filled(s) == before && !s.game_over() {
                s.tick(TickInput::NONE);
            }
            return;
        }
    }
}
