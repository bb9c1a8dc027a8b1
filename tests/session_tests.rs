//! Integration tests for the game state machine

mod common;

use common::{drop_at, filled, Always};

use efi_tetris::core::{GameSession, Phase, PieceKind, Rules, SimpleRng};
use efi_tetris::types::{TickInput, FIELD_HEIGHT, FIELD_WIDTH, SPAWN_X, SPAWN_Y};

#[test]
fn test_new_session() {
    let s = GameSession::new(Always(0));
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.score(), 0);
    assert_eq!(s.ticks(), 0);
    assert_eq!(s.active().kind, PieceKind::O);
    assert_eq!((s.active().x, s.active().y), (SPAWN_X, SPAWN_Y));
    assert_eq!(s.active().rotation, 0);
    assert_eq!(s.next_piece(), PieceKind::O);
    assert_eq!(filled(&s), 0);
}

#[test]
fn test_soft_dropped_o_lands_on_the_floor() {
    let mut s = GameSession::new(Always(0));
    drop_at(&mut s, SPAWN_X);

    let bottom = FIELD_HEIGHT as i32 - 1;
    for (x, y) in [(3, bottom), (4, bottom), (3, bottom - 1), (4, bottom - 1)] {
        assert_eq!(s.field().get(x, y), Some(Some('@')), "({x}, {y})");
    }
    assert_eq!(filled(&s), 4);
    assert_eq!(s.active().y, SPAWN_Y);
}

#[test]
fn test_gravity_alone_locks_a_piece() {
    let mut s = GameSession::new(Always(0));
    let speed = Rules::default().falling_speed(0) as u64;

    // Sixteen gravity steps to the floor, one more to lock.
    for _ in 0..speed * 17 - 1 {
        s.tick(TickInput::NONE);
    }
    assert_eq!(filled(&s), 0);
    assert_eq!(s.active().y, 16);

    s.tick(TickInput::NONE);
    assert_eq!(filled(&s), 4);
}

#[test]
fn test_top_tier_gravity_moves_every_four_ticks() {
    let rules = Rules {
        framerate: 1,
        tier_start_seconds: [0, 1, 2, 3, 4, 5, 6],
        ..Rules::default()
    };
    let mut s = GameSession::with_rules(Always(PieceKind::T.index() as u64), rules);
    for _ in 0..6 {
        s.tick(TickInput::NONE);
    }
    assert_eq!(s.tier(), 6);
    assert_eq!(s.rules().falling_speed(s.tier()), 4);

    let mut moves = Vec::new();
    for _ in 0..12 {
        let y = s.active().y;
        s.tick(TickInput::NONE);
        moves.push(s.active().y - y);
    }
    assert_eq!(moves, [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1]);
}

#[test]
fn test_two_full_rows_blink_then_clear() {
    let mut s = GameSession::new(Always(0));
    for x in (0..FIELD_WIDTH as i32).step_by(2) {
        drop_at(&mut s, x);
    }

    assert_eq!(s.phase(), Phase::LineClearing { animation_ticks: 0 });
    assert_eq!(filled(&s), 20);

    let animation = Rules::default().clear_animation_ticks();
    for _ in 0..animation {
        s.tick(TickInput::NONE);
    }
    assert_eq!(
        s.phase(),
        Phase::LineClearing {
            animation_ticks: animation
        }
    );
    assert_eq!(s.score(), 0);

    // Input is ignored while rows are blinking.
    let before = s.active();
    s.tick(TickInput::new(-1, 1, 1));
    assert_eq!(s.active(), before);

    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.score(), 2 * 100);
    assert_eq!(filled(&s), 0);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut s = GameSession::new(Always(0));
    for _ in 0..FIELD_HEIGHT / 2 {
        assert!(!s.game_over());
        drop_at(&mut s, SPAWN_X);
    }

    assert!(s.game_over());
    assert_eq!(s.phase(), Phase::GameOver);

    let ticks = s.ticks();
    let field = s.field().clone();
    for _ in 0..100 {
        s.tick(TickInput::new(1, 1, 1));
    }
    assert_eq!(s.ticks(), ticks);
    assert_eq!(s.field(), &field);
}

#[test]
fn test_reset_starts_over() {
    let mut s = GameSession::new(Always(0));
    for _ in 0..FIELD_HEIGHT / 2 {
        drop_at(&mut s, SPAWN_X);
    }
    assert!(s.game_over());

    s.reset();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.ticks(), 0);
    assert_eq!(filled(&s), 0);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameSession::new(SimpleRng::new(2024));
    let mut b = GameSession::new(SimpleRng::new(2024));
    let script = [
        TickInput::new(-1, 0, 0),
        TickInput::new(0, 1, 0),
        TickInput::new(1, 0, 1),
        TickInput::new(0, 0, -1),
        TickInput::NONE,
    ];

    for i in 0..5_000 {
        let input = script[i % script.len()];
        a.tick(input);
        b.tick(input);
    }
    assert_eq!(a.field(), b.field());
    assert_eq!(a.active(), b.active());
    assert_eq!(a.score(), b.score());
    assert_eq!(a.game_over(), b.game_over());
}

#[test]
fn test_rotation_wraps_through_the_session() {
    // Index 6 is the T piece, which has four rotations.
    let mut s = GameSession::new(Always(6));
    assert_eq!(s.active().kind, PieceKind::T);

    s.tick(TickInput::new(0, 0, -1));
    assert_eq!(s.active().rotation, 3);
    s.tick(TickInput::new(0, 0, 1));
    assert_eq!(s.active().rotation, 0);
}

#[test]
fn test_walls_block_shifts() {
    let mut s = GameSession::new(Always(0));
    for _ in 0..20 {
        s.tick(TickInput::new(-1, 0, 0));
    }
    assert_eq!(s.active().x, 0);

    for _ in 0..20 {
        s.tick(TickInput::new(1, 0, 0));
    }
    assert_eq!(s.active().x, FIELD_WIDTH as i32 - 2);
}
