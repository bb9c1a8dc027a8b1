//! Catalog module - the seven piece shapes
//!
//! Every piece is a small table of 4x4 occupancy masks, one per geometrically
//! distinct rotation. Masks are indexed `[row][col]`; `true` marks a filled
//! cell. A rotation step of +1 advances to the next mask, -1 goes back.

use crate::types::{MAX_ROTATIONS, PIECE_COUNT, PIECE_WINDOW};

/// A single 4x4 occupancy mask, indexed `[row][col]`.
pub type Mask = [[bool; PIECE_WINDOW]; PIECE_WINDOW];

const O: bool = false;
const X: bool = true;

/// Piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    J,
    L,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Map any word onto a piece by reducing it modulo the catalog size.
    pub fn from_word(word: u64) -> Self {
        Self::ALL[(word % PIECE_COUNT as u64) as usize]
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static PieceDef {
        &CATALOG[self.index()]
    }

    /// Character drawn for this piece on the field.
    pub fn glyph(self) -> char {
        self.def().glyph
    }

    pub fn rotation_count(self) -> usize {
        self.def().rotations.len()
    }
}

/// Immutable definition of one piece.
#[derive(Debug)]
pub struct PieceDef {
    glyph: char,
    rotations: &'static [Mask],
}

impl PieceDef {
    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Occupancy of `(col, row)` in the given rotation; false outside the window.
    pub fn occupied(&self, rotation: usize, col: usize, row: usize) -> bool {
        self.rotations
            .get(rotation)
            .and_then(|mask| mask.get(row))
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate the occupied `(col, row)` cells of a rotation.
    pub fn cells(&self, rotation: usize) -> impl Iterator<Item = (i32, i32)> + '_ {
        let mask = self.rotations.get(rotation);
        (0..PIECE_WINDOW * PIECE_WINDOW).filter_map(move |i| {
            let (row, col) = (i / PIECE_WINDOW, i % PIECE_WINDOW);
            match mask {
                Some(m) if m[row][col] => Some((col as i32, row as i32)),
                _ => None,
            }
        })
    }
}

/// Number of rotation states of a piece.
pub fn rotation_count_of(kind: PieceKind) -> usize {
    kind.rotation_count()
}

/// Occupancy of `(col, row)` of `kind` in `rotation`.
pub fn occupied(kind: PieceKind, rotation: usize, col: usize, row: usize) -> bool {
    kind.def().occupied(rotation, col, row)
}

/// Occupied `(col, row)` cells of `kind` in `rotation`.
pub fn cells(kind: PieceKind, rotation: usize) -> impl Iterator<Item = (i32, i32)> {
    kind.def().cells(rotation)
}

/// Wrap a rotation index moved by `step` into `0..count`.
///
/// Stepping below zero lands on the last rotation, stepping past the last
/// lands on zero.
pub fn wrap_rotation(kind: PieceKind, rotation: usize, step: i32) -> usize {
    let last = kind.rotation_count() - 1;
    match rotation.checked_add_signed(step as isize) {
        None => last,
        Some(next) if next > last => 0,
        Some(next) => next,
    }
}

#[rustfmt::skip]
static O_MASKS: [Mask; 1] = [[
    [X, X, O, O],
    [X, X, O, O],
    [O, O, O, O],
    [O, O, O, O],
]];

#[rustfmt::skip]
static I_MASKS: [Mask; 2] = [
    [
        [O, O, O, O],
        [X, X, X, X],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [O, X, O, O],
        [O, X, O, O],
        [O, X, O, O],
    ],
];

#[rustfmt::skip]
static S_MASKS: [Mask; 2] = [
    [
        [O, X, X, O],
        [X, X, O, O],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [O, X, X, O],
        [O, O, X, O],
        [O, O, O, O],
    ],
];

#[rustfmt::skip]
static Z_MASKS: [Mask; 2] = [
    [
        [O, X, X, O],
        [O, O, X, X],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, O, X, O],
        [O, X, X, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
];

#[rustfmt::skip]
static J_MASKS: [Mask; MAX_ROTATIONS] = [
    [
        [O, X, X, X],
        [O, O, O, X],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, O, X, O],
        [O, O, X, O],
        [O, X, X, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [O, X, X, X],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, X, O],
        [O, X, O, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
];

#[rustfmt::skip]
static L_MASKS: [Mask; MAX_ROTATIONS] = [
    [
        [X, X, X, O],
        [X, O, O, O],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, X, O],
        [O, O, X, O],
        [O, O, X, O],
        [O, O, O, O],
    ],
    [
        [O, O, X, O],
        [X, X, X, O],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [O, X, O, O],
        [O, X, X, O],
        [O, O, O, O],
    ],
];

#[rustfmt::skip]
static T_MASKS: [Mask; MAX_ROTATIONS] = [
    [
        [O, O, O, O],
        [X, X, X, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [X, X, O, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [X, X, X, O],
        [O, O, O, O],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [O, X, X, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
];

/// The piece table, indexed by [`PieceKind::index`].
pub static CATALOG: [PieceDef; PIECE_COUNT] = [
    PieceDef {
        glyph: '@',
        rotations: &O_MASKS,
    },
    PieceDef {
        glyph: 'H',
        rotations: &I_MASKS,
    },
    PieceDef {
        glyph: 'W',
        rotations: &S_MASKS,
    },
    PieceDef {
        glyph: 'Z',
        rotations: &Z_MASKS,
    },
    PieceDef {
        glyph: 'L',
        rotations: &J_MASKS,
    },
    PieceDef {
        glyph: 'T',
        rotations: &L_MASKS,
    },
    PieceDef {
        glyph: 'X',
        rotations: &T_MASKS,
    },
];
