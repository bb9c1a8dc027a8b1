//! Session module - the game state machine
//!
//! A [`GameSession`] owns the field, the falling piece, the preview piece and
//! the score, and advances exactly once per call to [`GameSession::tick`].
//! Nothing in here can fail: moves that would collide are rejected and the
//! only terminal condition is game over, which freezes the session.

use log::{debug, info};

use crate::catalog::{wrap_rotation, PieceKind};
use crate::field::Field;
use crate::rng::RandomSource;
use crate::rules::Rules;
use crate::types::{TickInput, SPAWN_X, SPAWN_Y};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// A piece at the spawn offset in its first rotation.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Occupied field coordinates of the piece.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        crate::catalog::cells(self.kind, self.rotation).map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Completed rows are blinking; `animation_ticks` counts up to the clear.
    LineClearing { animation_ticks: u32 },
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<R> {
    rules: Rules,
    rng: R,
    field: Field,
    active: ActivePiece,
    next: PieceKind,
    /// Ticks accumulated toward the next gravity step.
    fall_ticks: u32,
    score: u64,
    game_over: bool,
    clear_ticks: u32,
    /// Ticks played since the session (re)started.
    ticks: u64,
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session with the default rules and spawn the first piece.
    pub fn new(rng: R) -> Self {
        Self::with_rules(rng, Rules::default())
    }

    pub fn with_rules(rng: R, rules: Rules) -> Self {
        let mut session = Self {
            rules,
            rng,
            field: Field::new(),
            active: ActivePiece::spawn(PieceKind::O),
            next: PieceKind::O,
            fall_ticks: 0,
            score: 0,
            game_over: false,
            clear_ticks: 0,
            ticks: 0,
        };
        session.reset();
        session
    }

    /// Start over with an empty field. The random source keeps its state.
    pub fn reset(&mut self) {
        self.field.clear();
        self.score = 0;
        self.game_over = false;
        self.clear_ticks = 0;
        self.ticks = 0;
        self.next = self.draw_piece();
        self.spawn_next();
    }

    fn draw_piece(&mut self) -> PieceKind {
        PieceKind::from_word(self.rng.next_word())
    }

    /// Promote the preview piece to the active slot and draw a new preview.
    ///
    /// Enters game over when the fresh piece does not fit.
    fn spawn_next(&mut self) {
        self.active = ActivePiece::spawn(self.next);
        self.fall_ticks = 0;
        self.next = self.draw_piece();

        let a = self.active;
        if self.field.intersects(a.kind, a.rotation, a.x, a.y) {
            self.game_over = true;
            info!("game over after {} ticks, score {}", self.ticks, self.score);
        }
    }

    /// Rotate and shift the active piece in one attempt.
    ///
    /// Commits only when the resulting placement fits; otherwise nothing changes.
    pub fn try_move(&mut self, rotation: i32, dx: i32, dy: i32) -> bool {
        let a = self.active;
        let next_rotation = wrap_rotation(a.kind, a.rotation, rotation);
        let (x, y) = (a.x + dx, a.y + dy);

        if self.field.intersects(a.kind, next_rotation, x, y) {
            return false;
        }

        self.active = ActivePiece {
            rotation: next_rotation,
            x,
            y,
            ..a
        };
        true
    }

    fn lock_active(&mut self) {
        let a = self.active;
        self.field.lock(a.kind, a.rotation, a.x, a.y);
        debug!("locked {:?} r{} at ({}, {})", a.kind, a.rotation, a.x, a.y);
    }

    /// Delete completed rows and award points for them.
    fn flush_complete_rows(&mut self, tier: usize) {
        let cleared = self.field.clear_complete_rows();
        let points = self.rules.line_clear_score(cleared, tier);
        self.score = self.score.saturating_add(points);
        info!(
            "cleared {} rows at tier {} (+{}, score {})",
            cleared, tier, points, self.score
        );
    }

    /// Advance the game by one logical tick.
    pub fn tick(&mut self, input: TickInput) {
        if self.game_over {
            return;
        }

        let tier = self.rules.tier_for(self.ticks);
        self.ticks += 1;

        // Completed rows freeze play until their blink animation has run.
        if self.field.has_complete_rows() {
            if self.clear_iteration() < self.rules.clear_animation_steps {
                self.clear_ticks += 1;
            } else {
                self.flush_complete_rows(tier);
                self.clear_ticks = 0;
            }
            return;
        }

        let dx = input.dx.signum();
        let dy = input.dy.clamp(0, 1);
        let rotation = input.rotation.signum();

        if dy == 0 {
            self.fall_ticks += 1;
        }
        if self.fall_ticks >= self.rules.falling_speed(tier) {
            self.fall_ticks = 0;
            if !self.try_move(0, 0, 1) {
                self.lock_active();
                self.spawn_next();
                if self.game_over {
                    return;
                }
            }
        }

        if self.try_move(rotation, dx, dy) && dy != 0 {
            // A player drop already moved the piece; gravity starts over.
            self.fall_ticks = 0;
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.field.has_complete_rows() {
            Phase::LineClearing {
                animation_ticks: self.clear_ticks,
            }
        } else {
            Phase::Playing
        }
    }

    /// Current blink step of the line-clear animation.
    pub fn clear_iteration(&self) -> u32 {
        self.clear_ticks / self.rules.clear_animation_step_ticks.max(1)
    }

    pub fn tier(&self) -> usize {
        self.rules.tier_for(self.ticks)
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fall_ticks(&self) -> u32 {
        self.fall_ticks
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[cfg(test)]
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }
}
