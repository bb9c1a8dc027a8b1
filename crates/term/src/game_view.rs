//! GameView: maps a `core::GameSession` onto the character surface.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout (surface columns/rows):
//!
//! ```text
//! #          #  Frametime: 812 / 16666 (nom) us     row 0
//! #          #
//! #          #  NEXT:                               row 2
//! #          #
//! #          #   XXX                                rows 4-7
//! ...
//! #          #  Score: 00000100                     row 10
//! ...
//! #          #   [GAME OVER!]                       row 14
//! ############                                      row 18
//! ```

use core::fmt::Write as _;

use arrayvec::ArrayString;

use crate::core::{GameSession, PieceKind, RandomSource};
use crate::surface::Surface;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, PIECE_WINDOW, TARGET_FRAME_MICROS};

const BORDER: char = '#';
/// Glyph shown for completed rows on even blink steps; odd steps show blank.
const CLEARING: char = '-';

/// Lays out the field, the active piece and the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Surface column of the field's left border.
    pub field_x: usize,
    /// Surface column of the HUD labels.
    pub panel_x: usize,
    pub stats_y: usize,
    pub next_label_y: usize,
    pub next_preview_y: usize,
    pub score_y: usize,
    pub game_over_y: usize,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            field_x: 0,
            panel_x: 14,
            stats_y: 0,
            next_label_y: 2,
            next_preview_y: 4,
            score_y: 10,
            game_over_y: 14,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the session into `surface`, replacing its previous contents.
    ///
    /// `frame_micros` is the measured average frame cost shown in the HUD.
    pub fn render_into<R: RandomSource>(
        &self,
        session: &GameSession<R>,
        frame_micros: u64,
        surface: &mut Surface,
    ) {
        surface.clear();
        self.draw_border(surface);
        self.draw_field(surface, session);
        if !session.game_over() {
            self.draw_active(surface, session);
        }
        self.draw_next(surface, session.next_piece());
        self.draw_score(surface, session.score());
        if session.game_over() {
            surface.put_str(self.panel_x + 1, self.game_over_y, "[GAME OVER!]");
        }
        self.draw_stats(surface, frame_micros);
    }

    /// Convenience helper that builds a new surface.
    pub fn render<R: RandomSource>(&self, session: &GameSession<R>, frame_micros: u64) -> Surface {
        let mut surface = Surface::new();
        self.render_into(session, frame_micros, &mut surface);
        surface
    }

    fn draw_border(&self, surface: &mut Surface) {
        let right = self.field_x + FIELD_WIDTH + 1;
        for y in 0..=FIELD_HEIGHT {
            surface.put_char(self.field_x, y, BORDER);
            surface.put_char(right, y, BORDER);
        }
        for x in self.field_x..=right {
            surface.put_char(x, FIELD_HEIGHT, BORDER);
        }
    }

    /// Field cell (x, y) lands one column right of the left border.
    fn put_field_cell(&self, surface: &mut Surface, x: i32, y: i32, ch: char) {
        if x < 0 || y < 0 || x >= FIELD_WIDTH as i32 || y >= FIELD_HEIGHT as i32 {
            return;
        }
        surface.put_char(self.field_x + 1 + x as usize, y as usize, ch);
    }

    fn draw_field<R: RandomSource>(&self, surface: &mut Surface, session: &GameSession<R>) {
        let field = session.field();
        let blank_step = session.clear_iteration() & 1 == 1;

        for (y, row) in field.rows().enumerate() {
            let complete = field.is_row_complete(y);
            for (x, cell) in row.iter().enumerate() {
                let Some(glyph) = *cell else {
                    continue;
                };
                let ch = match (complete, blank_step) {
                    (false, _) => glyph,
                    (true, false) => CLEARING,
                    (true, true) => ' ',
                };
                self.put_field_cell(surface, x as i32, y as i32, ch);
            }
        }
    }

    fn draw_active<R: RandomSource>(&self, surface: &mut Surface, session: &GameSession<R>) {
        let active = session.active();
        let glyph = active.kind.glyph();
        for (x, y) in active.cells() {
            self.put_field_cell(surface, x, y, glyph);
        }
    }

    fn draw_next(&self, surface: &mut Surface, next: PieceKind) {
        surface.put_str(self.panel_x, self.next_label_y, "NEXT:");

        let def = next.def();
        for row in 0..PIECE_WINDOW {
            for col in 0..PIECE_WINDOW {
                if def.occupied(0, col, row) {
                    let (x, y) = (self.panel_x + 1 + col, self.next_preview_y + row);
                    surface.put_char(x, y, def.glyph());
                }
            }
        }
    }

    fn draw_score(&self, surface: &mut Surface, score: u64) {
        let mut buf = ArrayString::<32>::new();
        // 32 bytes hold any u64.
        let _ = write!(buf, "Score: {:08}", score);
        surface.put_str(self.panel_x, self.score_y, &buf);
    }

    fn draw_stats(&self, surface: &mut Surface, frame_micros: u64) {
        let mut buf = ArrayString::<64>::new();
        let _ = write!(
            buf,
            "Frametime: {} / {} (nom) us",
            frame_micros, TARGET_FRAME_MICROS
        );
        surface.put_str(self.panel_x, self.stats_y, &buf);
    }
}
